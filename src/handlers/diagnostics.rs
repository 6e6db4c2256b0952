use crate::{models::DiagnosticsResponse, state::AppState};
use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::{Mutex, OnceLock};
use sysinfo::System;
use tracing::info;

static SYSTEM_MONITOR: OnceLock<Mutex<System>> = OnceLock::new();

/// Report session, connection and host statistics
pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let n_sessions = state.store().session_count() as u32;
    let n_members = state.store().member_count() as u32;
    let n_conn = state.relay.router().connection_count() as u32;
    let uptime_secs = (Utc::now() - state.started_at).num_seconds();

    // System stats
    let (cpu_usage, memory_alloc, memory_free, memory_total) = {
        let sys_lock = SYSTEM_MONITOR.get_or_init(|| {
            Mutex::new(System::new_all())
        });
        match sys_lock.lock() {
            Ok(mut sys) => {
                sys.refresh_cpu();
                sys.refresh_memory();
                (
                    sys.global_cpu_info().cpu_usage(),
                    sys.used_memory(),
                    sys.free_memory(),
                    sys.total_memory(),
                )
            }
            Err(_) => (0.0, 0, 0, 0)
        }
    };

    info!(
        "Diagnostics: CPU: {:.2}%, Mem: {}/{} MB (Free: {} MB), Conn: {}, Sessions: {}",
        cpu_usage,
        memory_alloc / 1024 / 1024,
        memory_total / 1024 / 1024,
        memory_free / 1024 / 1024,
        n_conn,
        n_sessions
    );

    Json(DiagnosticsResponse {
        n_conn,
        n_sessions,
        n_members,
        uptime_secs,
        cpu_usage,
        memory_alloc,
        memory_total,
        memory_free,
    })
}
