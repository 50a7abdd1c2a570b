use expense_classifier::{
    persist, ClassifierError, FittedPipeline, KeywordScorer, MultinomialNaiveBayes, Pipeline,
    PipelineConfig, Scorer, TFIDFVectorizer,
};

fn training() -> Vec<(&'static str, &'static str)> {
    vec![
        ("coffee at starbucks", "Food & Drink"),
        ("monthly rent payment", "Housing"),
        ("netflix movie night", "Entertainment"),
    ]
}

fn larger_training() -> Vec<(String, String)> {
    let base = [
        ("latte at starbucks", "Food & Drink"),
        ("groceries at safeway", "Food & Drink"),
        ("dinner with friends", "Food & Drink"),
        ("apartment rent june", "Housing"),
        ("mortgage payment", "Housing"),
        ("comcast internet", "Utilities"),
        ("electric company", "Utilities"),
        ("netflix subscription", "Entertainment"),
        ("cinema movie tickets", "Entertainment"),
    ];
    (0..30)
        .map(|i| {
            let (text, label) = base[i % base.len()];
            (format!("{text} ref{}", i % 5), label.to_string())
        })
        .collect()
}

#[test]
fn starbucks_coffee_run_is_food_and_drink() {
    let fitted = FittedPipeline::fit(PipelineConfig::default(), MultinomialNaiveBayes::default(), &training()).unwrap();
    let (_, dist) = fitted.predict_with_distribution("starbucks coffee run").unwrap();
    let resolved = fitted.predict_one("starbucks coffee run").unwrap();

    assert_eq!(resolved.label, "Food & Drink");
    assert!(resolved.confidence > dist["Housing"]);
    assert!(resolved.confidence > dist["Entertainment"]);
}

#[test]
fn predictions_are_deterministic() {
    let fitted = FittedPipeline::fit(PipelineConfig::default(), MultinomialNaiveBayes::default(), &larger_training()).unwrap();
    let first = fitted.predict_one("coffee and groceries").unwrap();
    for _ in 0..20 {
        assert_eq!(fitted.predict_one("coffee and groceries").unwrap(), first);
    }

    let again = FittedPipeline::fit(PipelineConfig::default(), MultinomialNaiveBayes::default(), &larger_training()).unwrap();
    assert_eq!(again.predict_one("coffee and groceries").unwrap(), first);
}

#[test]
fn distributions_are_valid_and_confidence_is_their_max() {
    let fitted = FittedPipeline::fit(PipelineConfig::default(), MultinomialNaiveBayes::default(), &larger_training()).unwrap();
    for text in ["rent", "movie night", "totally unseen words", "", "internet comcast electric"] {
        let (label, dist) = fitted.predict_with_distribution(text).unwrap();
        let resolved = fitted.predict_one(text).unwrap();
        let sum: f64 = dist.values().sum();
        assert!((sum - 1.0).abs() < 1e-6, "{text:?} sums to {sum}");
        assert!(dist.values().all(|p| (0.0..=1.0).contains(p)));
        let max = dist.values().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(resolved.confidence, max);
        assert_eq!(resolved.label, label);
    }
}

#[test]
fn vocabulary_is_frozen_after_fit() {
    let fitted = FittedPipeline::fit(PipelineConfig::default(), MultinomialNaiveBayes::default(), &training()).unwrap();
    let vocab = fitted.vocabulary().clone();
    let idf = fitted.idf().clone();

    fitted.predict_batch(&["uber eats delivery", "rent rent rent", "brand new merchant"]).unwrap();
    fitted.vectorizer().transform(&["another unseen document"]).unwrap();

    assert_eq!(fitted.vocabulary(), &vocab);
    assert_eq!(fitted.idf(), &idf);
}

#[test]
fn unknown_terms_give_zero_vector() {
    let fitted = FittedPipeline::fit(PipelineConfig::default(), MultinomialNaiveBayes::default(), &training()).unwrap();
    let row = fitted.vectorizer().transform_one("uber lyft taxi").unwrap();
    assert_eq!(row.len(), fitted.vectorizer().dim());
    assert!(row.is_all_zero());
    assert!(fitted.predict_one("uber lyft taxi").is_ok());
}

#[test]
fn lifecycle_errors() {
    let pipeline = Pipeline::new(PipelineConfig::default(), MultinomialNaiveBayes::default());
    assert!(matches!(pipeline.predict_one("coffee"), Err(ClassifierError::NotFitted)));

    let mut pipeline = Pipeline::new(PipelineConfig::default(), MultinomialNaiveBayes::default());
    let empty: Vec<(&str, &str)> = Vec::new();
    assert!(matches!(pipeline.fit(&empty), Err(ClassifierError::EmptyCorpus)));

    pipeline.fit(&training()).unwrap();
    assert!(matches!(pipeline.fit(&training()), Err(ClassifierError::AlreadyFitted)));

    let mut vectorizer: TFIDFVectorizer = TFIDFVectorizer::default();
    let none: Vec<&str> = Vec::new();
    assert!(matches!(vectorizer.fit(&none), Err(ClassifierError::EmptyCorpus)));
}

#[test]
fn parallel_batch_equals_sequential() {
    let pairs = larger_training();
    let docs: Vec<&str> = pairs.iter().map(|(d, _)| d.as_str()).collect();

    let sequential = FittedPipeline::fit(
        PipelineConfig { parallel_threshold: usize::MAX, ..PipelineConfig::default() },
        MultinomialNaiveBayes::default(),
        &pairs,
    )
    .unwrap();
    let parallel = FittedPipeline::fit(
        PipelineConfig { parallel_threshold: 1, ..PipelineConfig::default() },
        MultinomialNaiveBayes::default(),
        &pairs,
    )
    .unwrap();

    assert_eq!(sequential.predict_batch(&docs).unwrap(), parallel.predict_batch(&docs).unwrap());
}

#[test]
fn persisted_parts_reload_to_same_predictions() {
    let fitted = FittedPipeline::fit(PipelineConfig::default(), MultinomialNaiveBayes::default(), &larger_training()).unwrap();
    let v_bytes = persist::save_vectorizer(fitted.vectorizer()).unwrap();
    let s_bytes = persist::to_bytes(fitted.scorer()).unwrap();

    let vectorizer: TFIDFVectorizer = persist::load_vectorizer(&v_bytes).unwrap();
    let scorer: MultinomialNaiveBayes = persist::from_bytes(&s_bytes).unwrap();
    assert_eq!(vectorizer.vocabulary(), fitted.vocabulary());
    assert_eq!(vectorizer.idf(), fitted.idf());
    assert_eq!(&scorer, fitted.scorer());

    let reloaded = FittedPipeline::from_parts(vectorizer, scorer, &PipelineConfig::default()).unwrap();
    for text in ["rent", "latte", "movie tickets"] {
        assert_eq!(reloaded.predict_one(text).unwrap(), fitted.predict_one(text).unwrap());
    }
}

#[test]
fn keyword_scorer_is_interchangeable() {
    let fitted = FittedPipeline::fit(PipelineConfig::default(), KeywordScorer::default(), &larger_training()).unwrap();
    assert!(fitted.scorer().is_fitted());
    assert_eq!(fitted.predict_one("cinema movie").unwrap().label, "Entertainment");
    assert_eq!(fitted.predict_one("parking garage").unwrap().label, "Other");
}

#[test]
fn persisted_keyword_scorer_reloads_to_same_predictions() {
    let fitted = FittedPipeline::fit(PipelineConfig::default(), KeywordScorer::default(), &larger_training()).unwrap();
    let v_bytes = persist::save_vectorizer(fitted.vectorizer()).unwrap();
    let s_bytes = persist::to_bytes(fitted.scorer()).unwrap();

    let vectorizer: TFIDFVectorizer = persist::load_vectorizer(&v_bytes).unwrap();
    let scorer: KeywordScorer = persist::from_bytes(&s_bytes).unwrap();
    assert_eq!(&scorer, fitted.scorer());

    let reloaded = FittedPipeline::from_parts(vectorizer, scorer, &PipelineConfig::default()).unwrap();
    for text in ["apartment rent", "cinema movie tickets", "comcast internet", "parking garage", ""] {
        assert_eq!(reloaded.predict_one(text).unwrap(), fitted.predict_one(text).unwrap());
        assert_eq!(
            reloaded.predict_with_distribution(text).unwrap(),
            fitted.predict_with_distribution(text).unwrap()
        );
    }
}

#[test]
fn unbound_keyword_scorer_cannot_fit() {
    let mut vectorizer: TFIDFVectorizer = TFIDFVectorizer::default();
    let docs: Vec<&str> = training().iter().map(|(d, _)| *d).collect();
    let labels: Vec<String> = training().iter().map(|(_, l)| l.to_string()).collect();
    let matrix = vectorizer.fit_transform(&docs).unwrap();

    let mut scorer = KeywordScorer::default();
    assert!(matches!(scorer.fit(&matrix, &labels), Err(ClassifierError::InvalidInput(_))));

    // a pipeline binds the vocabulary itself
    let fitted = FittedPipeline::fit(PipelineConfig::default(), scorer, &training()).unwrap();
    assert_eq!(fitted.predict_one("monthly rent").unwrap().label, "Housing");
}

#[test]
fn nan_tolerance_is_rejected() {
    let config = PipelineConfig { distribution_tolerance: f64::NAN, ..PipelineConfig::default() };
    assert!(matches!(
        FittedPipeline::fit(config, MultinomialNaiveBayes::default(), &training()),
        Err(ClassifierError::InvalidInput(_))
    ));
}
