// Resume evaluation: one job description + page 1 of one resume -> one model answer.
// Render and remote calls go through the `DocumentRenderer` and `EvaluationService` seams.

pub mod evaluator;
pub mod handlers;
pub mod models;
pub mod prompts;
