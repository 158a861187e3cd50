//! The fixed RQCFilter parameter set sent with every delegated run.

use serde::{Deserialize, Serialize};

/// RQCFilter options as understood by the BBTools service.
///
/// Toggles are `0`/`1` integers on the wire, not booleans, and the field
/// order below is the order they are serialized in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RqcFilterParams {
    pub rna: u8,
    pub trimfragadapter: u8,
    pub qtrim: String,
    pub trimq: u32,
    pub maxns: u32,
    pub minavgquality: u32,
    pub minlength: u32,
    pub mlf: f64,
    pub phix: u8,
    pub removehuman: u8,
    pub removedog: u8,
    pub removecat: u8,
    pub removemouse: u8,
    pub khist: u8,
    pub removemicrobes: u8,
    pub clumpify: u8,
}

impl Default for RqcFilterParams {
    fn default() -> Self {
        Self {
            rna: 0,
            trimfragadapter: 1,
            qtrim: "r".to_string(),
            trimq: 0,
            maxns: 3,
            minavgquality: 3,
            minlength: 51,
            mlf: 0.333,
            phix: 1,
            removehuman: 1,
            removedog: 1,
            removecat: 1,
            removemouse: 1,
            khist: 1,
            removemicrobes: 1,
            clumpify: 1,
        }
    }
}
