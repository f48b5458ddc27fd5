use crate::auth::Caller;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use axum::{extract::State, Json};
use scamsmart_core::scores::{GameType, SaveOutcome, SaveScoreRequest};
use scamsmart_core::verifier::verify_bingo_session;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn submit(
    State(state): State<Arc<AppState>>,
    Caller(player): Caller,
    Json(payload): Json<SaveScoreRequest>,
) -> AppResult<Json<SaveOutcome>> {
    let SaveScoreRequest {
        mut submission,
        rounds,
        deck,
    } = payload;

    // 1. Shape checks
    if submission.accuracy.is_some_and(|a| a > 100) {
        return Err(AppError::Validation(
            "accuracy must be between 0 and 100".into(),
        ));
    }
    if submission.game_type == GameType::ScamBingo && submission.score < 0 {
        return Err(AppError::Validation(
            "scam-bingo scores cannot be negative".into(),
        ));
    }

    // 2. Replay attached rounds
    if let Some(rounds) = &rounds {
        if submission.game_type != GameType::ScamBingo {
            return Err(AppError::Validation(
                "rounds can only be attached to scam-bingo scores".into(),
            ));
        }
        if let Some(deck) = &deck {
            if *deck != state.deck.fingerprint() {
                return Err(AppError::Validation(format!("unknown deck {}", deck)));
            }
        }

        let claimed = u32::try_from(submission.score)
            .map_err(|_| AppError::Validation("score out of range".into()))?;
        let report = verify_bingo_session(&state.rules, &state.deck, rounds, Some(claimed))?;
        if !report.matches() {
            warn!(
                "Rejected score from {}: claimed {}, replayed {}",
                player.id, claimed, report.computed_total
            );
            return Err(AppError::Validation(format!(
                "score {} does not match the replayed total {}",
                claimed, report.computed_total
            )));
        }
        if let Some(claimed) = submission.accuracy.filter(|a| *a != report.accuracy) {
            warn!(
                "Rejected accuracy from {}: claimed {}, replayed {}",
                player.id, claimed, report.accuracy
            );
            return Err(AppError::Validation(format!(
                "accuracy {} does not match the replayed accuracy {}",
                claimed, report.accuracy
            )));
        }
        submission.accuracy = Some(report.accuracy);
        info!("Replay verified for {}: {}", player.id, report.computed_total);
    }

    // 3. Persist
    let outcome = state.store.save(&player, &submission).await?;
    Ok(Json(outcome))
}
