//! Browser binding: the game shell drives a [`Session`] through this type
//!
//! Structured values cross the boundary as JSON strings.

use crate::error::ShotgunError;
use crate::puzzle::{LevelConfig, Session};
use crate::random::fresh_seed;
use wasm_bindgen::prelude::*;

fn to_js(err: ShotgunError) -> JsValue {
    let msg = err.to_string();
    web_sys::console::error_1(&JsValue::from_str(&msg));
    JsValue::from_str(&msg)
}

#[wasm_bindgen]
pub struct ShotgunWebEngine {
    session: Session,
}

#[wasm_bindgen]
impl ShotgunWebEngine {
    /// Start `level`; a missing seed draws a fresh one
    #[wasm_bindgen(constructor)]
    pub fn new(level: u8, seed: Option<u32>) -> Result<ShotgunWebEngine, JsValue> {
        let session = Session::new(level, seed.unwrap_or_else(fresh_seed)).map_err(to_js)?;
        Ok(ShotgunWebEngine { session })
    }

    /// Start a custom level given as camelCase JSON
    pub fn with_config(config_json: &str, seed: Option<u32>) -> Result<ShotgunWebEngine, JsValue> {
        let config = LevelConfig::from_json_str(config_json).map_err(to_js)?;
        let session = Session::with_config(config, seed.unwrap_or_else(fresh_seed)).map_err(to_js)?;
        Ok(ShotgunWebEngine { session })
    }

    pub fn seed(&self) -> u32 {
        self.session.seed()
    }

    /// Reads in presentation order
    pub fn reads_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.ordered_views()).map_err(|e| to_js(e.into()))
    }

    pub fn order(&self) -> Vec<u32> {
        self.session.order().iter().map(|&id| id as u32).collect()
    }

    pub fn reorder(&mut self, ids: Vec<u32>) -> Result<(), JsValue> {
        let ids: Vec<usize> = ids.into_iter().map(|id| id as usize).collect();
        self.session.reorder(&ids).map_err(to_js)?;
        Ok(())
    }

    pub fn move_read(&mut self, from: usize, to: usize) -> Result<(), JsValue> {
        self.session.move_read(from, to).map_err(to_js)?;
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.session.reset().map_err(to_js)?;
        Ok(())
    }

    pub fn next_level(&mut self, seed: Option<u32>) -> Result<(), JsValue> {
        self.session
            .next_level(seed.unwrap_or_else(fresh_seed))
            .map_err(to_js)
    }

    pub fn assembled(&self) -> String {
        self.session.report().assembled.clone()
    }

    pub fn similarity(&self) -> f64 {
        self.session.report().similarity
    }

    pub fn is_success(&self) -> bool {
        self.session.report().success
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn set_reveal(&mut self, reveal: bool) {
        self.session.set_reveal(reveal);
    }

    /// The reference while revealed, otherwise `undefined`
    pub fn reference(&self) -> Option<String> {
        self.session.visible_reference().map(str::to_string)
    }

    pub fn fingerprint(&self) -> String {
        self.session.fingerprint().root_hash
    }
}
