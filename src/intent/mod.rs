//! Intent resolution pipeline
//!
//! request -> keywords + (verb, noun) -> static catalog -> providers

pub mod keywords;
pub mod parser;
pub mod resolver;
pub mod stemmer;

pub use keywords::extract_keywords;
pub use parser::{ParsedIntent, VerbNounParser, DEFAULT_NOUN};
pub use resolver::{DetectionResult, Resolver};
pub use stemmer::stem;
