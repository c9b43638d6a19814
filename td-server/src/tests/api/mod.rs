mod error;
mod validate;
