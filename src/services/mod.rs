pub mod civic_api;
