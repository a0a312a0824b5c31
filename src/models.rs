use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inner payload of `ISteamUser/ResolveVanityURL`.
///
/// On a miss Steam answers with `{"success": 42, "message": "No match"}`, so
/// every field is optional.
#[derive(Deserialize, Debug, Default)]
pub struct ResolveVanityResponse {
    pub steamid: Option<String>,
}

impl ResolveVanityResponse {
    /// The resolved id, if Steam actually returned one.
    pub fn resolved_id(&self) -> Option<&str> {
        self.steamid.as_deref().filter(|id| !id.is_empty())
    }
}

/// A single entry of the owned games list (`appid`, `name`, `playtime_forever`, ...).
///
/// Kept as raw JSON, whatever Steam sends for an entry goes back out unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Game(pub Value);

/// Inner payload of `IPlayerService/GetOwnedGames`.
///
/// A private profile yields an empty object.
#[derive(Deserialize, Debug, Default)]
pub struct OwnedGamesResponse {
    pub games: Option<Vec<Game>>,
    pub game_count: Option<u64>,
}

impl OwnedGamesResponse {
    /// Returns the games and the count only when both are present and non-empty.
    pub fn into_owned_games(self) -> Option<OwnedGamesBody> {
        let games = self.games.filter(|games| !games.is_empty())?;
        let game_count = self.game_count.filter(|count| *count > 0)?;

        Some(OwnedGamesBody { games, game_count })
    }
}

#[derive(Serialize, Debug)]
pub struct SteamIdBody {
    pub steamid: String,
}

#[derive(Serialize, Debug)]
pub struct OwnedGamesBody {
    pub games: Vec<Game>,
    pub game_count: u64,
}
