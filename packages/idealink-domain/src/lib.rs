pub mod candidate;
pub mod keywords;
pub mod quality;
pub mod ranking;
pub mod similarity;
pub mod text;

pub use candidate::{
	Candidate, CandidateSource, CandidateType, Connection, Note, QualityScores, ScoredCandidate,
	UnknownCandidateType,
};
