//! The Star Wars schema served by default.

use async_graphql::{EmptyMutation, EmptySubscription, Enum, Object, Schema, ID};

pub(crate) type StarWarsSchema = Schema<Query, EmptyMutation, EmptySubscription>;

pub(crate) fn star_wars() -> StarWarsSchema {
    Schema::new(Query, EmptyMutation, EmptySubscription)
}

/// One of the films in the Star Wars trilogy
#[derive(Enum, Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Episode {
    /// Released in 1977.
    NewHope,
    /// Released in 1980.
    Empire,
    /// Released in 1983.
    Jedi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Human,
    Droid,
}

struct CharacterData {
    id: &'static str,
    name: &'static str,
    kind: Kind,
    friends: &'static [&'static str],
    appears_in: &'static [Episode],
    home_planet: Option<&'static str>,
    primary_function: Option<&'static str>,
}

const ALL_EPISODES: &[Episode] = &[Episode::NewHope, Episode::Empire, Episode::Jedi];

static CHARACTERS: &[CharacterData] = &[
    CharacterData {
        id: "1000",
        name: "Luke Skywalker",
        kind: Kind::Human,
        friends: &["1002", "1003", "2000", "2001"],
        appears_in: ALL_EPISODES,
        home_planet: Some("Tatooine"),
        primary_function: None,
    },
    CharacterData {
        id: "1001",
        name: "Darth Vader",
        kind: Kind::Human,
        friends: &["1004"],
        appears_in: ALL_EPISODES,
        home_planet: Some("Tatooine"),
        primary_function: None,
    },
    CharacterData {
        id: "1002",
        name: "Han Solo",
        kind: Kind::Human,
        friends: &["1000", "1003", "2001"],
        appears_in: ALL_EPISODES,
        home_planet: None,
        primary_function: None,
    },
    CharacterData {
        id: "1003",
        name: "Leia Organa",
        kind: Kind::Human,
        friends: &["1000", "1002", "2000", "2001"],
        appears_in: ALL_EPISODES,
        home_planet: Some("Alderaan"),
        primary_function: None,
    },
    CharacterData {
        id: "1004",
        name: "Wilhuff Tarkin",
        kind: Kind::Human,
        friends: &["1001"],
        appears_in: &[Episode::NewHope],
        home_planet: None,
        primary_function: None,
    },
    CharacterData {
        id: "2000",
        name: "C-3PO",
        kind: Kind::Droid,
        friends: &["1000", "1002", "1003", "2001"],
        appears_in: ALL_EPISODES,
        home_planet: None,
        primary_function: Some("Protocol"),
    },
    CharacterData {
        id: "2001",
        name: "R2-D2",
        kind: Kind::Droid,
        friends: &["1000", "1002", "1003"],
        appears_in: ALL_EPISODES,
        home_planet: None,
        primary_function: Some("Astromech"),
    },
];

fn find(id: &str, kind: Kind) -> Option<Character> {
    CHARACTERS
        .iter()
        .find(|character| character.id == id && character.kind == kind)
        .map(Character)
}

/// A human or a droid.
pub(crate) struct Character(&'static CharacterData);

#[Object]
impl Character {
    async fn id(&self) -> ID {
        ID::from(self.0.id)
    }

    async fn name(&self) -> &'static str {
        self.0.name
    }

    async fn friends(&self) -> Vec<Character> {
        self.0
            .friends
            .iter()
            .filter_map(|id| CHARACTERS.iter().find(|character| character.id == *id))
            .map(Character)
            .collect()
    }

    /// Which movies they appear in.
    async fn appears_in(&self) -> Vec<Episode> {
        self.0.appears_in.to_vec()
    }

    /// The home planet of the human, or null if unknown.
    async fn home_planet(&self) -> Option<&'static str> {
        self.0.home_planet
    }

    /// The primary function of the droid.
    async fn primary_function(&self) -> Option<&'static str> {
        self.0.primary_function
    }
}

pub(crate) struct Query;

#[Object]
impl Query {
    /// Luke is the hero of The Empire Strikes Back, R2-D2 of every other episode.
    async fn hero(&self, episode: Option<Episode>) -> Option<Character> {
        match episode {
            Some(Episode::Empire) => find("1000", Kind::Human),
            _ => find("2001", Kind::Droid),
        }
    }

    async fn human(&self, id: ID) -> Option<Character> {
        find(&id, Kind::Human)
    }

    async fn droid(&self, id: ID) -> Option<Character> {
        find(&id, Kind::Droid)
    }
}
