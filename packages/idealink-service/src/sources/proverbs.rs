use idealink_domain::{Candidate, CandidateSource, CandidateType};

use crate::{
	BoxFuture, Result, SourceAdapter,
	placeholder::{PROVERB_BAND, PlaceholderScores},
};

pub const PROVERB_SOURCE: &str = "proverbs";
pub const MAX_MATCHES: usize = 2;
pub const PROVERB_AUTHOR: &str = "한국 속담";

#[derive(Debug, Clone, Copy)]
pub struct Proverb {
	pub content: &'static str,
	pub keywords: &'static [&'static str],
	pub category: &'static str,
}
impl Proverb {
	/// Either side being a substring of the other counts as a match.
	pub fn matches(&self, keywords: &[String]) -> bool {
		self.keywords.iter().any(|own| {
			keywords.iter().any(|keyword| {
				let keyword = keyword.trim();

				!keyword.is_empty() && (keyword.contains(own) || own.contains(keyword))
			})
		})
	}
}

pub const PROVERBS: &[Proverb] = &[
	Proverb {
		content: "백지장도 맞들면 낫다",
		keywords: &["협력", "친구", "우정", "팀워크", "함께"],
		category: "협동",
	},
	Proverb {
		content: "천 리 길도 한 걸음부터",
		keywords: &["성장", "시작", "노력", "목표", "발전"],
		category: "시작",
	},
	Proverb {
		content: "티끌 모아 태산",
		keywords: &["성장", "습관", "노력", "축적", "인내"],
		category: "노력",
	},
	Proverb {
		content: "구르는 돌에는 이끼가 끼지 않는다",
		keywords: &["성장", "변화", "도전", "활동", "발전"],
		category: "변화",
	},
	Proverb {
		content: "넘어진 김에 쉬어간다",
		keywords: &["실패", "긍정", "여유", "지혜", "태도"],
		category: "긍정",
	},
	Proverb {
		content: "실패는 성공의 어머니",
		keywords: &["실패", "성공", "배움", "성장", "도전"],
		category: "실패",
	},
	Proverb {
		content: "친구 따라 강남 간다",
		keywords: &["친구", "영향", "관계", "선택"],
		category: "관계",
	},
	Proverb {
		content: "세 사람이 가면 그 중에 스승이 있다",
		keywords: &["배움", "관계", "지혜", "성장", "겸손"],
		category: "배움",
	},
	Proverb {
		content: "말 한마디에 천 냥 빚도 갚는다",
		keywords: &["말", "소통", "언어", "관계", "힘"],
		category: "소통",
	},
	Proverb {
		content: "급할수록 돌아가라",
		keywords: &["인내", "계획", "지혜", "전략"],
		category: "인내",
	},
];

/// The built-in proverb list, scored from a fixed trust band.
pub struct ProverbAdapter {
	placeholder: PlaceholderScores,
}
impl ProverbAdapter {
	pub fn new(placeholder: PlaceholderScores) -> Self {
		Self { placeholder }
	}

	pub fn lookup(&self, keywords: &[String], limit: usize) -> Vec<Candidate> {
		let mut draw = self.placeholder.draw(PROVERB_SOURCE, keywords);

		PROVERBS
			.iter()
			.filter(|proverb| proverb.matches(keywords))
			.take(limit.min(MAX_MATCHES))
			.map(|proverb| {
				Candidate::new(CandidateType::Proverb, proverb.content)
					.with_source(CandidateSource {
						author: Some(PROVERB_AUTHOR.to_string()),
						category: Some(proverb.category.to_string()),
						..Default::default()
					})
					.with_raw_score(draw.sample(PROVERB_BAND))
					.with_reasoning(format!("{}와 관련된 지혜입니다.", proverb.keywords.join(", ")))
			})
			.collect()
	}
}
impl SourceAdapter for ProverbAdapter {
	fn search<'a>(
		&'a self,
		keywords: &'a [String],
		limit: usize,
	) -> BoxFuture<'a, Result<Vec<Candidate>>> {
		Box::pin(async move { Ok(self.lookup(keywords, limit)) })
	}
}
