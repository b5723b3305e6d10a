use std::{
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};

use idealink_config::Config;
use idealink_domain::{Candidate, CandidateType};
use idealink_service::{
	BoxFuture, Error, IdeaLinkService, Result, SearchRequest, SourceAdapter, SourceEntry,
	aggregate,
	corpus::{CorpusCache, CorpusCategory},
	sources::library::LibraryAdapter,
};
use idealink_testkit::{TestCorpus, item};

const CONFIG_FILE: &str = "idealink.toml";

struct Fixed(Vec<Candidate>);
impl SourceAdapter for Fixed {
	fn search<'a>(
		&'a self,
		_keywords: &'a [String],
		limit: usize,
	) -> BoxFuture<'a, Result<Vec<Candidate>>> {
		Box::pin(async move { Ok(self.0.iter().take(limit).cloned().collect()) })
	}
}

struct Failing;
impl SourceAdapter for Failing {
	fn search<'a>(
		&'a self,
		_keywords: &'a [String],
		_limit: usize,
	) -> BoxFuture<'a, Result<Vec<Candidate>>> {
		Box::pin(async { Err(Error::Provider { message: "upstream returned 503".to_string() }) })
	}
}

struct Slow(Duration);
impl SourceAdapter for Slow {
	fn search<'a>(
		&'a self,
		_keywords: &'a [String],
		_limit: usize,
	) -> BoxFuture<'a, Result<Vec<Candidate>>> {
		Box::pin(async move {
			tokio::time::sleep(self.0).await;

			Ok(vec![Candidate::new(CandidateType::Quote, "arrived too late")])
		})
	}
}

#[derive(Default)]
struct Counting(AtomicUsize);
impl SourceAdapter for Counting {
	fn search<'a>(
		&'a self,
		_keywords: &'a [String],
		_limit: usize,
	) -> BoxFuture<'a, Result<Vec<Candidate>>> {
		self.0.fetch_add(1, Ordering::SeqCst);

		Box::pin(async { Ok(Vec::new()) })
	}
}

fn load_config(corpus: &TestCorpus, quality_filter: bool) -> Config {
	let raw = format!(
		r#"
[service]
http_bind = "127.0.0.1:0"
log_level = "debug"

[corpus]
root = '{}'

[search]
limit              = 10
relevance_floor    = 0.3
quality_filter     = {quality_filter}
adapter_timeout_ms = 200

[sources.library]
enabled = true
[sources.proverbs]
enabled = true
[sources.quotable]
enabled = false
api_base = ""
timeout_ms = 0
[sources.wikipedia]
enabled = false
api_base = ""
timeout_ms = 0
[sources.google_books]
enabled = false
api_base = ""
timeout_ms = 0

[placeholder]
mode = "midpoint"
"#,
		corpus.root().display()
	);

	corpus.write_raw(CONFIG_FILE, &raw).expect("Failed to write config.");

	idealink_config::load(&corpus.root().join(CONFIG_FILE)).expect("Failed to load config.")
}

fn quote(content: &str, score: f32) -> Candidate {
	Candidate::new(CandidateType::Quote, content).with_raw_score(score)
}

fn entry(name: &str, serves: &[CandidateType], adapter: Arc<dyn SourceAdapter>) -> SourceEntry {
	SourceEntry::new(name, serves, 20, adapter)
}

fn stub_service(corpus: &TestCorpus, sources: Vec<SourceEntry>) -> IdeaLinkService {
	let cfg = load_config(corpus, false);
	let cache = Arc::new(CorpusCache::new(corpus.root()));

	IdeaLinkService::with_sources(cfg, cache, sources)
}

fn request(note_text: &str) -> SearchRequest {
	SearchRequest { note_text: note_text.to_string(), ..Default::default() }
}

#[tokio::test]
async fn growth_note_surfaces_the_thousand_mile_proverb() {
	let corpus = TestCorpus::new().expect("Failed to create corpus.");
	let service = IdeaLinkService::new(load_config(&corpus, false)).expect("Failed to build.");
	let res = service.search(request("매일 조금씩 성장하고 싶다")).await.expect("Search failed.");

	assert_eq!(res.keywords, vec!["성장", "습관"]);
	assert!(res.validated);

	let proverb = res
		.items
		.iter()
		.find(|item| item.content == "천 리 길도 한 걸음부터")
		.expect("Proverb missing.");

	assert!(proverb.relevance >= 0.3);
	assert_eq!(proverb.kind, CandidateType::Proverb);
}

#[tokio::test]
async fn missing_category_file_does_not_hide_the_others() {
	let corpus = TestCorpus::new().expect("Failed to create corpus.");

	corpus
		.write_items(
			"academic.json",
			&[item("a1", "academic", "습관 형성에 관한 연구", "연구자", &["습관"])],
		)
		.expect("Failed to write academic.");
	corpus
		.write_items("essays.json", &[item("e1", "essay", "습관에 대하여", "수필가", &["습관"])])
		.expect("Failed to write essays.");

	let cache = Arc::new(CorpusCache::new(corpus.root()));
	let adapter = LibraryAdapter::new(
		cache.clone(),
		&[CorpusCategory::Academic, CorpusCategory::Essay, CorpusCategory::Web],
	);
	let found = adapter.search(&["습관".to_string()], 15).await.expect("Search failed.");
	let kinds: Vec<CandidateType> = found.iter().map(|c| c.kind).collect();

	assert_eq!(found.len(), 2);
	assert!(kinds.contains(&CandidateType::Academic));
	assert!(kinds.contains(&CandidateType::Essay));

	let stats = cache.stats();

	assert_eq!(stats.get("academic"), Some(&1));
	assert_eq!(stats.get("web"), None);
}

#[tokio::test]
async fn failed_load_is_retried_on_next_request() {
	let corpus = TestCorpus::new().expect("Failed to create corpus.");

	corpus.write_raw("poems.json", "{ not json").expect("Failed to write.");

	let cache = CorpusCache::new(corpus.root());

	assert!(cache.load(CorpusCategory::Poem).await.is_empty());
	assert!(cache.stats().is_empty());

	corpus
		.write_items("poems.json", &[item("p1", "poem", "별 헤는 밤", "윤동주", &["꿈"])])
		.expect("Failed to write.");

	assert_eq!(cache.load(CorpusCategory::Poem).await.len(), 1);
}

#[tokio::test]
async fn one_failing_source_leaves_the_others_intact() {
	let sources = vec![
		entry("a", &[CandidateType::Quote], Arc::new(Fixed(vec![quote("alpha", 0.9)]))),
		entry("broken", &[CandidateType::Quote], Arc::new(Failing)),
		entry("c", &[CandidateType::Quote], Arc::new(Fixed(vec![quote("gamma", 0.8)]))),
	];
	let found =
		aggregate::gather(&sources, &[], &["성장".to_string()], Duration::from_millis(200)).await;
	let contents: Vec<&str> = found.iter().map(|c| c.content.as_str()).collect();

	assert_eq!(contents, vec!["alpha", "gamma"]);
}

#[tokio::test]
async fn slow_source_is_cut_off_by_the_timeout() {
	let sources = vec![
		entry("slow", &[CandidateType::Quote], Arc::new(Slow(Duration::from_secs(5)))),
		entry("fast", &[CandidateType::Quote], Arc::new(Fixed(vec![quote("fast", 0.9)]))),
	];
	let found =
		aggregate::gather(&sources, &[], &["성장".to_string()], Duration::from_millis(50)).await;

	assert_eq!(found.len(), 1);
	assert_eq!(found[0].content, "fast");
}

#[tokio::test]
async fn type_filter_routes_to_matching_sources_only() {
	let books = Arc::new(Counting::default());
	let quotes = Arc::new(Counting::default());
	let sources = vec![
		entry("books", &[CandidateType::Book], books.clone()),
		entry("quotes", &[CandidateType::Quote, CandidateType::ScreenLine], quotes.clone()),
	];

	aggregate::gather(&sources, &[CandidateType::ScreenLine], &["x".to_string()], Duration::from_secs(1))
		.await;

	assert_eq!(books.0.load(Ordering::SeqCst), 0);
	assert_eq!(quotes.0.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn output_is_floored_sorted_and_capped() {
	let corpus = TestCorpus::new().expect("Failed to create corpus.");
	let candidates: Vec<Candidate> =
		(0..15).map(|idx| quote(&format!("entry{idx}"), 0.2 + idx as f32 * 0.05)).collect();
	let service = stub_service(
		&corpus,
		vec![entry("bulk", &[CandidateType::Quote], Arc::new(Fixed(candidates)))],
	);
	let res = service.search(request("성장하는 하루")).await.expect("Search failed.");

	assert!(res.validated);
	assert!(res.items.len() <= 10);
	assert!(res.items.iter().all(|item| item.relevance >= 0.3));
	assert!(res.items.windows(2).all(|pair| pair[0].relevance >= pair[1].relevance));
	assert_eq!(res.items[0].content, "entry14");
}

#[tokio::test]
async fn equal_relevance_keeps_arrival_order_and_dedups_attributions() {
	let corpus = TestCorpus::new().expect("Failed to create corpus.");
	let service = stub_service(
		&corpus,
		vec![
			entry(
				"first",
				&[CandidateType::Quote],
				Arc::new(Fixed(vec![quote("stay hungry - Steve Jobs", 0.5), quote("zeta", 0.5)])),
			),
			entry(
				"second",
				&[CandidateType::Quote],
				Arc::new(Fixed(vec![quote("stay hungry", 0.9), quote("eta", 0.5)])),
			),
		],
	);
	let res = service.search(request("성장하는 하루")).await.expect("Search failed.");
	let contents: Vec<&str> = res.items.iter().map(|item| item.content.as_str()).collect();

	assert_eq!(contents, vec!["stay hungry - Steve Jobs", "zeta", "eta"]);
}

#[tokio::test]
async fn nothing_above_floor_is_a_normal_empty_result() {
	let corpus = TestCorpus::new().expect("Failed to create corpus.");
	let service = stub_service(
		&corpus,
		vec![entry("weak", &[CandidateType::Quote], Arc::new(Fixed(vec![quote("faint", 0.1)])))],
	);
	let res = service.search(request("성장하는 하루")).await.expect("Search failed.");

	assert!(res.items.is_empty());
	assert!(!res.validated);
}

#[tokio::test]
async fn empty_note_skips_every_source() {
	let corpus = TestCorpus::new().expect("Failed to create corpus.");
	let counter = Arc::new(Counting::default());
	let service =
		stub_service(&corpus, vec![entry("count", &[CandidateType::Quote], counter.clone())]);
	let res = service.search(request("   ")).await.expect("Search failed.");

	assert!(res.keywords.is_empty());
	assert!(!res.validated);
	assert_eq!(counter.0.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn request_limit_only_lowers_the_configured_cap() {
	let corpus = TestCorpus::new().expect("Failed to create corpus.");
	let candidates: Vec<Candidate> =
		(0..12).map(|idx| quote(&format!("item{idx}"), 0.9)).collect();
	let service = stub_service(
		&corpus,
		vec![entry("bulk", &[CandidateType::Quote], Arc::new(Fixed(candidates)))],
	);
	let lowered = SearchRequest { limit: Some(3), ..request("성장하는 하루") };
	let raised = SearchRequest { limit: Some(50), ..request("성장하는 하루") };

	assert_eq!(service.search(lowered).await.expect("Search failed.").items.len(), 3);
	assert_eq!(service.search(raised).await.expect("Search failed.").items.len(), 10);
}

#[tokio::test]
async fn invalid_requests_are_rejected_before_any_source_runs() {
	let corpus = TestCorpus::new().expect("Failed to create corpus.");
	let counter = Arc::new(Counting::default());
	let service =
		stub_service(&corpus, vec![entry("count", &[CandidateType::Quote], counter.clone())]);
	let unknown_type =
		SearchRequest { type_filter: vec!["podcast".to_string()], ..request("성장하는 하루") };
	let zero_limit = SearchRequest { limit: Some(0), ..request("성장하는 하루") };

	assert!(matches!(
		service.search(unknown_type).await,
		Err(Error::InvalidRequest { .. })
	));
	assert!(matches!(service.search(zero_limit).await, Err(Error::InvalidRequest { .. })));
	assert_eq!(counter.0.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn quality_gate_drops_keyword_coincidences() {
	let corpus = TestCorpus::new().expect("Failed to create corpus.");
	let cfg = load_config(&corpus, true);
	let sources = vec![entry(
		"mixed",
		&[CandidateType::Quote],
		Arc::new(Fixed(vec![
			quote("실패는 성공의 어머니이며 실패의 원인을 아는 것이 성장의 본질이다", 0.8),
			quote("점심 메뉴를 고르는 방법", 0.8),
		])),
	)];
	let service =
		IdeaLinkService::with_sources(cfg, Arc::new(CorpusCache::new(corpus.root())), sources);
	let res = service
		.search(request("실패를 통해 성장하는 방법을 배우고 싶다"))
		.await
		.expect("Search failed.");

	assert_eq!(res.items.len(), 1);
	assert!(res.items[0].quality_scores.is_some());
	assert!(res.items[0].content.starts_with("실패는"));
}

#[tokio::test]
async fn scored_ids_are_stable_for_a_note() {
	let corpus = TestCorpus::new().expect("Failed to create corpus.");
	let service = stub_service(
		&corpus,
		vec![entry("a", &[CandidateType::Quote], Arc::new(Fixed(vec![quote("alpha", 0.9)])))],
	);
	let note_id = uuid::Uuid::new_v4();
	let first = SearchRequest { note_id: Some(note_id), ..request("성장하는 하루") };
	let second = first.clone();
	let a = service.search(first).await.expect("Search failed.");
	let b = service.search(second).await.expect("Search failed.");

	assert_eq!(a.note_id, note_id);
	assert_eq!(a.items[0].id, b.items[0].id);
}

fn seeded_proverbs_service(corpus: &TestCorpus) -> IdeaLinkService {
	let mut cfg = load_config(corpus, false);

	cfg.placeholder.mode = "random".to_string();
	cfg.placeholder.seed = Some(7);
	cfg.sources.library.enabled = false;
	cfg.sources.local_quotes.enabled = false;

	IdeaLinkService::new(cfg).expect("Failed to build.")
}

#[tokio::test]
async fn seeded_random_scores_repeat_across_searches() {
	let corpus = TestCorpus::new().expect("Failed to create corpus.");
	let service = seeded_proverbs_service(&corpus);
	let req = SearchRequest {
		note_id: Some(uuid::Uuid::new_v4()),
		..request("매일 조금씩 성장하고 싶다")
	};
	let relevances = |res: idealink_service::SearchResponse| -> Vec<f32> {
		res.items.iter().map(|item| item.relevance).collect()
	};
	let first = relevances(service.search(req.clone()).await.expect("Search failed."));
	let second = relevances(service.search(req.clone()).await.expect("Search failed."));
	let (third, fourth) = tokio::join!(service.search(req.clone()), service.search(req.clone()));
	let rebuilt = seeded_proverbs_service(&corpus);
	let fifth = relevances(rebuilt.search(req).await.expect("Search failed."));

	assert!(!first.is_empty());
	assert_eq!(first, second);
	assert_eq!(first, relevances(third.expect("Search failed.")));
	assert_eq!(first, relevances(fourth.expect("Search failed.")));
	assert_eq!(first, fifth);
}
