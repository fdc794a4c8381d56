pub mod cat;
pub mod chunk;
pub mod uniq;
