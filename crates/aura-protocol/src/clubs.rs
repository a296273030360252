//! Club names offered by the register and profile forms.
//!
//! Option list only. Whether a club puts the user behind the banter gate
//! is decided by the server and arrives as `UserProfile::banter_mode`.

pub const CLUBS: [&str; 20] = [
    "Arsenal",
    "Aston Villa",
    "AFC Bournemouth",
    "Brentford",
    "Brighton & Hove Albion",
    "Burnley",
    "Chelsea",
    "Crystal Palace",
    "Everton",
    "Fulham",
    "Leeds United",
    "Liverpool",
    "Manchester City",
    "Manchester United",
    "Newcastle United",
    "Nottingham Forest",
    "Sunderland",
    "Tottenham Hotspur",
    "West Ham United",
    "Wolverhampton Wanderers",
];

/// The club preselected on the register form.
pub const DEFAULT_CLUB: &str = "Arsenal";

pub fn is_known_club(name: &str) -> bool {
    CLUBS.contains(&name)
}
