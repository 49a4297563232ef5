use anyhow::Result;

use gosm::presentation::output::{classification_event, classification_line, emit};
use gosm::transcoder::Classifier;

pub fn cmd_classify(tokens: &[String], json: bool) -> Result<()> {
    let mut classifier = Classifier::new();

    if json {
        emit(serde_json::json!({
            "event": "start",
            "command": "classify",
        }))?;
        for token in tokens {
            let classification = classifier.classify_with_rule(token);
            emit(classification_event(token, &classification))?;
        }
        emit(serde_json::json!({
            "event": "complete",
            "command": "classify",
            "count": tokens.len(),
        }))?;
        return Ok(());
    }

    for token in tokens {
        let classification = classifier.classify_with_rule(token);
        println!("{}", classification_line(token, &classification));
    }
    Ok(())
}
