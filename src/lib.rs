pub mod attendees;
pub mod fetch;
pub mod frequency;
pub mod letter;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod plural;
pub mod services;
pub mod stats;
