// src/handlers/exam.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    error::AppError,
    exam::{
        catalog::{list_exams as exams_for, parse_interests},
        identifier::parse_exam_id,
        scoring::{grade, improvement_suggestions},
    },
    models::{
        exam::{ExamListParams, StartExamRequest, StartExamResponse},
        exam_record::{HistoryParams, NewExamResult, SubmitExamRequest, SubmitExamResponse},
        question::PublicQuestion,
    },
    state::AppState,
    store::ResultStore,
};

fn required_user_id(user_id: Option<String>) -> Result<String, AppError> {
    user_id
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::BadRequest("userId is required".to_string()))
}

/// Lists the static exams plus one exam per difficulty for each of the user's interests.
pub async fn list_exams(Query(params): Query<ExamListParams>) -> Result<impl IntoResponse, AppError> {
    let user_id = required_user_id(params.user_id)?;
    let interests = parse_interests(params.interests.as_deref());
    let exams = exams_for(&user_id, &interests);

    Ok(Json(serde_json::json!({
        "exams": exams,
        "userInterests": interests,
    })))
}

/// Starts an exam attempt.
///
/// * Parses the exam id into a profile (subject, difficulty, question count).
/// * Generates questions, degrading to the fallback bank.
/// * Opens a session holding the answer key; the client only receives the questions.
pub async fn start_exam(
    State(state): State<AppState>,
    Json(mut req): Json<StartExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.user_id = req.user_id.trim().to_string();
    req.exam_id = req.exam_id.trim().to_string();
    if let Err(validation_errors) = req.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let profile = parse_exam_id(&req.exam_id);
    if let Some(owner) = profile.user_id.as_deref()
        && owner != req.user_id
    {
        tracing::warn!(
            "User {} started exam {} generated for {}",
            req.user_id,
            req.exam_id,
            owner
        );
    }

    let batch = state.questions.generate(&profile).await;
    let questions: Vec<PublicQuestion> = batch.questions.iter().map(PublicQuestion::from).collect();

    let session_id = state
        .sessions
        .open(&req.user_id, profile.clone(), batch.questions)
        .await;

    tracing::info!(
        "Exam session {} opened for user {} ({} questions, {:?})",
        session_id,
        req.user_id,
        questions.len(),
        batch.source
    );

    Ok(Json(StartExamResponse {
        session_id,
        exam_id: profile.exam_id.clone(),
        questions,
        source: batch.source,
        profile,
    }))
}

/// Grades a submission and stores the result.
///
/// * With a `sessionId`, grades against the server-held answer key and closes the session.
///   An unknown or already-submitted session is a conflict.
/// * Without one, counts the client-reported `isCorrect` flags.
/// * Result storage is best-effort: failures are logged and `resultId` is null.
pub async fn submit_exam(
    State(state): State<AppState>,
    Json(mut req): Json<SubmitExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.user_id = req.user_id.trim().to_string();
    req.exam_id = req.exam_id.trim().to_string();
    if let Err(validation_errors) = req.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }
    let answers = req.answers.unwrap_or_default();

    let session = match req.session_id {
        Some(session_id) => Some(
            state
                .sessions
                .take(&session_id, &req.user_id)
                .await
                .ok_or_else(|| {
                    AppError::Conflict("Exam session not found or already submitted".to_string())
                })?,
        ),
        None => {
            tracing::warn!(
                "Grading exam {} for user {} from client-reported answers",
                req.exam_id,
                req.user_id
            );
            None
        }
    };

    let profile = match &session {
        Some(s) => {
            if s.profile.exam_id != req.exam_id {
                tracing::warn!(
                    "Submission for exam {} used session of exam {}",
                    req.exam_id,
                    s.profile.exam_id
                );
            }
            s.profile.clone()
        }
        None => parse_exam_id(&req.exam_id),
    };

    let key = session.as_ref().map(|s| s.questions.as_slice());
    let grade = grade(&answers, key, profile.passing_score);

    let time_taken_minutes = req
        .time_taken_minutes
        .or_else(|| session.as_ref().map(|s| s.elapsed_minutes(Utc::now())))
        .unwrap_or(0.0);

    let suggestions = improvement_suggestions(state.generator.as_ref(), &profile, &grade).await;

    let record = NewExamResult {
        user_id: req.user_id.clone(),
        exam_id: profile.exam_id.clone(),
        subject: profile.subject.clone(),
        difficulty: profile.difficulty.as_str().to_string(),
        score: grade.score as i32,
        correct: grade.correct as i32,
        total: grade.total as i32,
        passed: grade.passed,
        time_taken_minutes,
        suggestions: suggestions.clone(),
    };

    let result_id = match state.results.insert_result(record).await {
        Ok(row) => Some(row.id),
        Err(e) => {
            tracing::error!("Failed to store exam result for user {}: {}", req.user_id, e);
            None
        }
    };

    tracing::info!(
        "User {} scored {}% on {} ({})",
        req.user_id,
        grade.score,
        profile.exam_id,
        if grade.passed { "PASSED" } else { "FAILED" }
    );

    Ok(Json(SubmitExamResponse {
        success: true,
        score: grade.score,
        total: grade.total,
        correct: grade.correct,
        passed: grade.passed,
        suggestions,
        result_id,
    }))
}

/// Returns a user's past results, newest first.
pub async fn get_history(
    State(results): State<Arc<dyn ResultStore>>,
    Query(params): Query<HistoryParams>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = required_user_id(params.user_id)?;
    let history = results.history(&user_id).await?;

    Ok(Json(serde_json::json!({ "history": history })))
}
