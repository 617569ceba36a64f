//! Per-session execution context.
//!
//! Names of derived tables come from a counter owned by the context, so two
//! independent sessions never share naming state.

use relalg_core::config::EngineConfig;

#[derive(Debug, Clone)]
pub struct ExecContext {
    rename_suffix: String,
    next_id: u64,
}

impl ExecContext {
    pub fn new() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self {
            rename_suffix: cfg.rename_suffix.clone(),
            next_id: 0,
        }
    }

    /// Name for the next result derived from `base`: `base0`, `base1`, ...
    pub fn derive_name(&mut self, base: &str) -> String {
        let id = self.next_id;
        self.next_id += 1;
        format!("{base}{id}")
    }

    /// Suffix appended to a colliding right-hand attribute name in joins.
    pub fn rename_suffix(&self) -> &str {
        &self.rename_suffix
    }

    /// Number of names handed out so far.
    pub fn derived(&self) -> u64 {
        self.next_id
    }
}

impl Default for ExecContext {
    fn default() -> Self {
        Self::new()
    }
}
