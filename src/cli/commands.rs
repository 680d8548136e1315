//! Standalone `ingest` and `query` commands.

use crate::cli::output::Output;
use crate::rag::indexer::{ChunkIndex, IndexPaths};
use crate::rag::pipeline::{IngestionRun, RagPipeline};
use crate::types::{AppError, QueryOutcome, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Ingest `source` and persist the index pair at `paths`.
pub async fn ingest(
    pipeline: &RagPipeline,
    source: &str,
    paths: &IndexPaths,
    output: &Output,
) -> Result<IngestionRun> {
    output.step(1, 2, &format!("Ingesting {}", source));
    let run = pipeline.ingest_to_dir(source, paths).await?;

    output.step(2, 2, "Index persisted");
    output.ingestion(&run, paths);
    output.complete("Ingestion complete.");
    Ok(run)
}

/// Load a persisted index pair, pointing at `ingest` when it is missing.
pub fn load_index(paths: &IndexPaths, output: &Output) -> Result<ChunkIndex> {
    ChunkIndex::load(paths).inspect_err(|e| {
        if matches!(e, AppError::NotFound(_)) {
            output.missing_index(paths);
        }
    })
}

/// Answer each question in order, printing one JSON outcome per question.
pub async fn answer_questions<W: Write>(
    pipeline: &RagPipeline,
    index: &ChunkIndex,
    questions: &[String],
    out: &mut W,
) -> Result<usize> {
    for question in questions {
        let outcome = pipeline.query(question, index).await?;
        write_outcome(out, &outcome)?;
    }
    Ok(questions.len())
}

/// Prompt for questions until `stop` (any case) or end of input.
///
/// A failing question is reported and the loop continues. Returns the
/// number of questions answered.
pub async fn interactive<R, W>(
    pipeline: &RagPipeline,
    index: &ChunkIndex,
    input: R,
    out: &mut W,
    output: &Output,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut answered = 0;

    loop {
        write!(out, "{}", output.prompt())?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();

        if question.eq_ignore_ascii_case("stop") {
            writeln!(out, "Exiting.")?;
            break;
        }
        if question.is_empty() {
            continue;
        }

        match pipeline.query(question, index).await {
            Ok(outcome) => {
                write_outcome(out, &outcome)?;
                answered += 1;
            }
            Err(e) => output.error(&e.to_string()),
        }
    }

    Ok(answered)
}

fn write_outcome<W: Write>(out: &mut W, outcome: &QueryOutcome) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(outcome)?)?;
    Ok(())
}
