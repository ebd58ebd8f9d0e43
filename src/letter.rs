//! Thank-you letter rendering.

use anyhow::{Context, Result};
use askama::Template;

use crate::normalize::{CleanPhone, CleanZipcode};
use crate::services::civic_api::{FIND_REPRESENTATIVES_FALLBACK, Legislators, Representative};

/// Everything a letter template may refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterContext {
    pub name: String,
    pub zipcode: CleanZipcode,
    pub legislators: Legislators,
    pub phone: CleanPhone,
}

/// Renders a [`LetterContext`] into a document body.
pub trait DocumentRenderer {
    fn render(&self, ctx: &LetterContext) -> Result<String>;
}

#[derive(Template)]
#[template(path = "form_letter.html")]
struct FormLetter<'a> {
    name: &'a str,
    zipcode: &'a str,
    lookup_failed: bool,
    fallback: &'a str,
    representatives: &'a [Representative],
    phone: Option<&'a str>,
}

/// Renders the compiled `templates/form_letter.html` letter.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormLetterRenderer;

impl DocumentRenderer for FormLetterRenderer {
    fn render(&self, ctx: &LetterContext) -> Result<String> {
        let representatives = match &ctx.legislators {
            Legislators::Found(reps) => reps.as_slice(),
            Legislators::LookupFailed => &[],
        };
        let phone = match &ctx.phone {
            CleanPhone::Valid(digits) => Some(digits.as_str()),
            CleanPhone::Invalid => None,
        };

        FormLetter {
            name: &ctx.name,
            zipcode: ctx.zipcode.as_str(),
            lookup_failed: !ctx.legislators.is_found(),
            fallback: FIND_REPRESENTATIVES_FALLBACK,
            representatives,
            phone,
        }
        .render()
        .context("failed to render form letter")
    }
}
