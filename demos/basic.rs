use expense_classifier::{persist, FittedPipeline, KeywordScorer, MultinomialNaiveBayes, PipelineConfig};

fn main() -> expense_classifier::Result<()> {
    let training = [
        ("coffee at starbucks", "Food & Drink"),
        ("weekly groceries", "Food & Drink"),
        ("monthly rent payment", "Housing"),
        ("comcast internet", "Utilities"),
        ("netflix movie night", "Entertainment"),
    ];

    let pipeline = FittedPipeline::fit(PipelineConfig::default(), MultinomialNaiveBayes::default(), &training)?;
    for text in ["starbucks coffee run", "rent for june", "movie tickets"] {
        let (label, dist) = pipeline.predict_with_distribution(text)?;
        let resolved = pipeline.predict_one(text)?;
        println!("{text:?} -> {label} (confidence {:.2})", resolved.confidence);
        println!("    {dist:?}");
    }

    // vectorizer and scorer are persisted separately
    let vectorizer_blob = persist::save_vectorizer(pipeline.vectorizer())?;
    let scorer_blob = persist::to_bytes(pipeline.scorer())?;
    println!("vectorizer: {} bytes, scorer: {} bytes", vectorizer_blob.len(), scorer_blob.len());

    let rules = FittedPipeline::fit(PipelineConfig::default(), KeywordScorer::default(), &training)?;
    println!("{:?}", rules.predict_batch(&["internet bill", "uber ride"])?);
    Ok(())
}
