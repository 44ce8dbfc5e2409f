//! 알림 쿨다운 상태 저장소.
//!
//! 종목/알림 유형별 마지막 전송 시각을 JSON 파일에 보관해 재시작 후에도
//! 쿨다운이 유지되게 합니다. 저장은 임시 파일에 쓴 뒤 rename하는 방식이라
//! 저장 중 중단돼도 기존 파일이 깨지지 않습니다.

use crate::error::Result;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// 종목별 알림 유형별 마지막 전송 시각.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(flatten)]
    entries: HashMap<String, HashMap<String, DateTime<Utc>>>,
}

/// 알림 쿨다운 상태.
#[derive(Debug)]
pub struct AlertState {
    path: PathBuf,
    cooldown: Duration,
    state: StateFile,
}

impl AlertState {
    /// 상태 파일을 로드합니다. 파일이 없으면 빈 상태로 시작합니다.
    pub fn load(path: impl Into<PathBuf>, cooldown: Duration) -> Self {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(state) => state,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "상태 파일 파싱 실패, 빈 상태로 시작");
                    StateFile::default()
                }
            },
            Err(_) => StateFile::default(),
        };

        Self {
            path,
            cooldown,
            state,
        }
    }

    /// 쿨다운 길이를 갱신합니다. 기존 전송 기록에 즉시 적용됩니다.
    pub fn set_cooldown(&mut self, cooldown: Duration) {
        self.cooldown = cooldown;
    }

    /// 상태 파일 경로를 반환합니다.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 쿨다운이 지나 알림을 보낼 수 있는지 확인합니다.
    pub fn should_notify(&self, code: &str, kind: &str, now: DateTime<Utc>) -> bool {
        let Some(last_sent) = self
            .state
            .entries
            .get(code)
            .and_then(|kinds| kinds.get(kind))
        else {
            return true;
        };

        let Ok(cooldown) = ChronoDuration::from_std(self.cooldown) else {
            return true;
        };
        now - *last_sent >= cooldown
    }

    /// 알림 전송을 기록합니다.
    pub fn mark_sent(&mut self, code: &str, kind: &str, now: DateTime<Utc>) {
        self.state
            .entries
            .entry(code.to_string())
            .or_default()
            .insert(kind.to_string(), now);
    }

    /// 상태를 파일에 저장합니다.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.state)?;
        let tmp_path = tmp_path(&self.path);
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;
        debug!(path = %self.path.display(), "알림 상태 저장");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut os_string = path.as_os_str().to_owned();
    os_string.push(".tmp");
    PathBuf::from(os_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    fn temp_state_path() -> PathBuf {
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!(
            "signal-watcher-test-{}-{}.json",
            std::process::id(),
            id
        ))
    }

    #[test]
    fn test_cooldown_blocks_repeat_alerts() {
        let path = temp_state_path();
        let mut state = AlertState::load(&path, Duration::from_secs(3600));
        let now = Utc::now();

        assert!(state.should_notify("005930", "entry", now));
        state.mark_sent("005930", "entry", now);

        // 쿨다운 이내 재전송 차단
        assert!(!state.should_notify("005930", "entry", now + ChronoDuration::minutes(30)));
        // 쿨다운 경과 후 허용
        assert!(state.should_notify("005930", "entry", now + ChronoDuration::minutes(61)));
        // 다른 유형/종목은 영향 없음
        assert!(state.should_notify("005930", "stop_loss", now));
        assert!(state.should_notify("000660", "entry", now));
    }

    #[test]
    fn test_cooldown_update_applies_to_existing_entries() {
        let path = temp_state_path();
        let mut state = AlertState::load(&path, Duration::from_secs(3600));
        let now = Utc::now();

        state.mark_sent("005930", "entry", now);
        assert!(!state.should_notify("005930", "entry", now + ChronoDuration::minutes(30)));

        // 쿨다운 단축은 이미 기록된 전송에도 바로 반영된다
        state.set_cooldown(Duration::from_secs(600));
        assert!(state.should_notify("005930", "entry", now + ChronoDuration::minutes(30)));

        // 연장도 마찬가지
        state.set_cooldown(Duration::from_secs(7200));
        assert!(!state.should_notify("005930", "entry", now + ChronoDuration::minutes(90)));
    }

    #[test]
    fn test_state_survives_reload() {
        let path = temp_state_path();
        let now = Utc::now();

        let mut state = AlertState::load(&path, Duration::from_secs(3600));
        state.mark_sent("005930", "take_profit", now);
        state.save().unwrap();

        let reloaded = AlertState::load(&path, Duration::from_secs(3600));
        assert!(!reloaded.should_notify("005930", "take_profit", now + ChronoDuration::minutes(10)));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_corrupt_state_file_starts_empty() {
        let path = temp_state_path();
        std::fs::write(&path, "not json").unwrap();

        let state = AlertState::load(&path, Duration::from_secs(3600));
        assert!(state.should_notify("005930", "entry", Utc::now()));

        std::fs::remove_file(&path).ok();
    }
}
