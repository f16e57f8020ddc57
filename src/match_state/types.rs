use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    SunrisersHyderabad,
    MumbaiIndians,
    RoyalChallengersBangalore,
    KolkataKnightRiders,
    PunjabKings,
    ChennaiSuperKings,
    RajasthanRoyals,
    DelhiCapitals,
}

impl Team {
    const ALL: [Team; 8] = [
        Team::SunrisersHyderabad,
        Team::MumbaiIndians,
        Team::RoyalChallengersBangalore,
        Team::KolkataKnightRiders,
        Team::PunjabKings,
        Team::ChennaiSuperKings,
        Team::RajasthanRoyals,
        Team::DelhiCapitals,
    ];

    pub fn all() -> &'static [Team] {
        &Self::ALL
    }

    /// Label as it appears in the training data
    pub fn name(&self) -> &'static str {
        match self {
            Team::SunrisersHyderabad => "Sunrisers Hyderabad",
            Team::MumbaiIndians => "Mumbai Indians",
            Team::RoyalChallengersBangalore => "Royal Challengers Bangalore",
            Team::KolkataKnightRiders => "Kolkata Knight Riders",
            Team::PunjabKings => "Punjab Kings",
            Team::ChennaiSuperKings => "Chennai Super Kings",
            Team::RajasthanRoyals => "Rajasthan Royals",
            Team::DelhiCapitals => "Delhi Capitals",
        }
    }

    /// Every team that can bowl against `self`
    pub fn opponents(self) -> impl Iterator<Item = Team> {
        Self::ALL.into_iter().filter(move |t| *t != self)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Team {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .ok_or(())
    }
}

impl Serialize for Team {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Team {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label
            .parse()
            .map_err(|_| de::Error::custom(format!("unknown team: {}", label)))
    }
}

/// Host city or ground. "Bangalore" and "Bengaluru" are separate labels in
/// the historical data and stay separate here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Venue {
    Hyderabad,
    Bangalore,
    Mumbai,
    Indore,
    Kolkata,
    Delhi,
    Chandigarh,
    Jaipur,
    Chennai,
    CapeTown,
    PortElizabeth,
    Durban,
    Centurion,
    EastLondon,
    Johannesburg,
    Kimberley,
    Bloemfontein,
    Ahmedabad,
    Cuttack,
    Nagpur,
    Dharamsala,
    Visakhapatnam,
    Pune,
    Raipur,
    Ranchi,
    AbuDhabi,
    Sharjah,
    Mohali,
    Bengaluru,
}

impl Venue {
    const ALL: [Venue; 29] = [
        Venue::Hyderabad,
        Venue::Bangalore,
        Venue::Mumbai,
        Venue::Indore,
        Venue::Kolkata,
        Venue::Delhi,
        Venue::Chandigarh,
        Venue::Jaipur,
        Venue::Chennai,
        Venue::CapeTown,
        Venue::PortElizabeth,
        Venue::Durban,
        Venue::Centurion,
        Venue::EastLondon,
        Venue::Johannesburg,
        Venue::Kimberley,
        Venue::Bloemfontein,
        Venue::Ahmedabad,
        Venue::Cuttack,
        Venue::Nagpur,
        Venue::Dharamsala,
        Venue::Visakhapatnam,
        Venue::Pune,
        Venue::Raipur,
        Venue::Ranchi,
        Venue::AbuDhabi,
        Venue::Sharjah,
        Venue::Mohali,
        Venue::Bengaluru,
    ];

    pub fn all() -> &'static [Venue] {
        &Self::ALL
    }

    pub fn name(&self) -> &'static str {
        match self {
            Venue::Hyderabad => "Hyderabad",
            Venue::Bangalore => "Bangalore",
            Venue::Mumbai => "Mumbai",
            Venue::Indore => "Indore",
            Venue::Kolkata => "Kolkata",
            Venue::Delhi => "Delhi",
            Venue::Chandigarh => "Chandigarh",
            Venue::Jaipur => "Jaipur",
            Venue::Chennai => "Chennai",
            Venue::CapeTown => "Cape Town",
            Venue::PortElizabeth => "Port Elizabeth",
            Venue::Durban => "Durban",
            Venue::Centurion => "Centurion",
            Venue::EastLondon => "East London",
            Venue::Johannesburg => "Johannesburg",
            Venue::Kimberley => "Kimberley",
            Venue::Bloemfontein => "Bloemfontein",
            Venue::Ahmedabad => "Ahmedabad",
            Venue::Cuttack => "Cuttack",
            Venue::Nagpur => "Nagpur",
            Venue::Dharamsala => "Dharamsala",
            Venue::Visakhapatnam => "Visakhapatnam",
            Venue::Pune => "Pune",
            Venue::Raipur => "Raipur",
            Venue::Ranchi => "Ranchi",
            Venue::AbuDhabi => "Abu Dhabi",
            Venue::Sharjah => "Sharjah",
            Venue::Mohali => "Mohali",
            Venue::Bengaluru => "Bengaluru",
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Venue {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(wanted))
            .ok_or(())
    }
}

impl Serialize for Venue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Venue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label
            .parse()
            .map_err(|_| de::Error::custom(format!("unknown venue: {}", label)))
    }
}

/// Raw match state as it arrives over the wire, before any invariant checks.
///
/// Counts are signed so a negative value reaches validation and gets a
/// proper error instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchInput {
    pub batting_team: String,
    pub bowling_team: String,
    pub venue: String,
    pub overs_completed: i64,
    #[serde(default)]
    pub balls_in_current_over: i64,
    pub runs_scored: i64,
    #[serde(default)]
    pub wickets_lost: i64,
    pub target: i64,
}
