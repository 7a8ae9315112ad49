//! Plain-text status report for a vault snapshot

use std::fmt::Write;
use vault::{GlobalToken, VaultConfig, VaultState};

/// Render a human-readable summary of `state`
pub fn render_status(state: &VaultState, cfg: &VaultConfig) -> String {
    let mut out = String::new();

    let server = cfg.server_url.as_deref().unwrap_or("(default)");
    let _ = writeln!(out, "Server:   {}", server);
    let _ = writeln!(
        out,
        "Session:  {}",
        if state.is_logged_in() { "logged in" } else { "logged out" }
    );

    let global = match state.tokens.global() {
        GlobalToken::NeverSet => "never synced".to_string(),
        GlobalToken::Null => "no progress".to_string(),
        GlobalToken::Token(t) => t.as_str().to_string(),
    };
    let _ = writeln!(out, "Collections token: {}", global);

    let sync = if state.sync_due(cfg.sync_cooldown_secs) {
        "due".to_string()
    } else {
        match state.sync_run.last_resolved_at() {
            Some(at) => format!(
                "cooling down (last success {})",
                at.format("%Y-%m-%d %H:%M:%S")
            ),
            None => "running".to_string(),
        }
    };
    let _ = writeln!(out, "Sync:     {}", sync);

    let _ = writeln!(out, "Collections:");
    for (col_uid, entry) in state.cache.collections() {
        let token = state
            .tokens
            .collection(col_uid)
            .map(|t| t.as_str())
            .unwrap_or("-");
        let _ = writeln!(
            out,
            "  {}{}  items: {} live  token: {}",
            col_uid,
            if entry.deleted { " (deleted)" } else { "" },
            state.cache.live_item_count(col_uid),
            token
        );
    }

    let _ = writeln!(out, "Errors:   {}", state.errors.len());
    for record in state.errors.records() {
        let _ = writeln!(
            out,
            "  [{}] {}",
            record.recorded_at.format("%Y-%m-%d %H:%M:%S"),
            record.message
        );
    }

    if !state.settings.is_empty() {
        let _ = writeln!(out, "Settings:");
        for (key, value) in state.settings.iter() {
            let _ = writeln!(out, "  {} = {}", key, value);
        }
    }

    out
}
