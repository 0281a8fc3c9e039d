pub mod catalog;
pub mod dict;
pub mod edict;
pub mod index;
pub mod ngram;
pub mod settings;
pub mod unicode;
