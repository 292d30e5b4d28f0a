//! Game broker client
//!
//! Moves are exchanged as a plain `{from, to, turn}` structure wrapped
//! in a `{success, data}` envelope. Polling cadence and retries belong
//! to the game loop; this client only does single requests.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use wargame_core::{Coord, CoordPair};

/// One grid cell on the wire
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct WireCoord {
    row: i8,
    col: i8,
}

/// One move on the wire
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct WireMove {
    from: WireCoord,
    to: WireCoord,
    turn: u32,
}

impl From<WireMove> for CoordPair {
    fn from(wire: WireMove) -> Self {
        CoordPair::new(
            Coord::new(wire.from.row, wire.from.col),
            Coord::new(wire.to.row, wire.to.col),
        )
    }
}

impl WireMove {
    fn new(mv: CoordPair, turn: u32) -> Self {
        Self {
            from: WireCoord { row: mv.src.row, col: mv.src.col },
            to: WireCoord { row: mv.dst.row, col: mv.dst.col },
            turn,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    data: Option<WireMove>,
}

/// Blocking HTTP client for a single broker endpoint
pub struct BrokerClient {
    url: String,
    http: reqwest::blocking::Client,
}

impl BrokerClient {
    pub fn new(url: String) -> Self {
        Self { url, http: reqwest::blocking::Client::new() }
    }

    /// Fetch the move published for `turn`, if any. Data published for a
    /// different turn is ignored.
    pub fn fetch_move(&self, turn: u32) -> Result<Option<CoordPair>> {
        let envelope: Envelope = self
            .http
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .with_context(|| format!("broker GET {} failed", self.url))?
            .json()
            .context("broker sent malformed JSON")?;
        if !envelope.success {
            bail!("broker reported failure");
        }
        Ok(envelope.data.filter(|data| data.turn == turn).map(CoordPair::from))
    }

    /// Publish our move for `turn`; the broker echoes the data back on
    /// success.
    pub fn publish_move(&self, mv: CoordPair, turn: u32) -> Result<()> {
        let wire = WireMove::new(mv, turn);
        let envelope: Envelope = self
            .http
            .post(&self.url)
            .json(&wire)
            .send()
            .with_context(|| format!("broker POST {} failed", self.url))?
            .json()
            .context("broker sent malformed JSON")?;
        if !envelope.success {
            bail!("broker rejected move {mv}");
        }
        if envelope.data != Some(wire) {
            tracing::warn!(%mv, turn, "broker echoed different data");
        }
        Ok(())
    }
}
