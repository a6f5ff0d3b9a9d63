pub mod corpus;
pub mod index;
