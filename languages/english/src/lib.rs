pub mod dictionary;
pub mod examples;
pub mod http;
pub mod levels;
pub mod loader;
pub mod morphology;
pub mod parse;
pub mod processor;
pub mod sources;
pub mod translator;

pub use dictionary::Ecdict;
pub use levels::ExamLevel;
pub use loader::EcdictLoader;
pub use morphology::EnglishMorphology;
pub use processor::EnglishProcessor;
pub use sources::{Datamuse, FreeDictionary, MerriamWebster, SourceError, YoudaoDictionary};
pub use translator::{BaiduTranslator, YoudaoTranslator};
