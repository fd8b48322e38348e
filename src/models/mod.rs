pub mod mode;
pub mod question;

pub use mode::GenerationMode;
pub use question::{QuizOption, TaggedQuestion};
