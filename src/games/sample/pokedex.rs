//! Species and game tables of the sample catalog.

use crate::species::{
    Category as Cat, Color, Game, Pokedex, PokemonType as T, Region, Species, SpeciesRegistry,
};

fn line(names: &[&str], gen: u8, types: &[&[T]], color: Color, category: Cat, legs: u8) -> Vec<Species> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let species = Species::new(*name, gen, types[i.min(types.len() - 1)])
                .with_colors(&[color])
                .with_categories(&[category])
                .with_legs(legs);
            match names.get(i + 1) {
                Some(next) => species.with_evolutions([*next]),
                None => species,
            }
        })
        .collect()
}

fn kanto(gen: u8) -> Vec<Species> {
    let mut all = Vec::new();
    all.extend(line(&["Bulbasaur", "Ivysaur", "Venusaur"], 1, &[&[T::Grass, T::Poison]], Color::Green, Cat::Plant, 4));
    all.extend(line(
        &["Charmander", "Charmeleon", "Charizard"],
        1,
        &[&[T::Fire], &[T::Fire], &[T::Fire, T::Flying]],
        Color::Red,
        Cat::Reptile,
        2,
    ));
    all.extend(line(&["Squirtle", "Wartortle", "Blastoise"], 1, &[&[T::Water]], Color::Blue, Cat::Turtle, 2));
    all.extend(line(&["Pidgey", "Pidgeotto", "Pidgeot"], 1, &[&[T::Normal, T::Flying]], Color::Brown, Cat::Bird, 2));
    all.extend(line(&["Rattata", "Raticate"], 1, &[&[T::Normal]], Color::Purple, Cat::Rodent, 4));
    all.extend(line(
        &["Caterpie", "Metapod", "Butterfree"],
        1,
        &[&[T::Bug], &[T::Bug], &[T::Bug, T::Flying]],
        Color::Green,
        Cat::Bug,
        6,
    ));
    all.extend(line(&["Pikachu", "Raichu"], 1, &[&[T::Electric]], Color::Yellow, Cat::Mouse, 2));
    all.extend(line(&["Geodude", "Graveler", "Golem"], 1, &[&[T::Rock, T::Ground]], Color::Brown, Cat::Item, 2));
    all.extend(line(&["Abra", "Kadabra", "Alakazam"], 1, &[&[T::Psychic]], Color::Brown, Cat::Human, 2));
    all.extend(line(&["Machop", "Machoke", "Machamp"], 1, &[&[T::Fighting]], Color::Gray, Cat::Human, 2));
    all.extend(line(&["Gastly", "Haunter", "Gengar"], 1, &[&[T::Ghost, T::Poison]], Color::Purple, Cat::Fantasy, 0));
    all.extend(line(&["Seel", "Dewgong"], 1, &[&[T::Water], &[T::Water, T::Ice]], Color::White, Cat::Watermon, 0));
    all.extend(line(
        &["Dratini", "Dragonair", "Dragonite"],
        1,
        &[&[T::Dragon], &[T::Dragon], &[T::Dragon, T::Flying]],
        Color::Blue,
        Cat::Dragon,
        0,
    ));

    // Magnemite gained the Steel type when it was introduced.
    let magnet: &[T] = if gen >= 2 { &[T::Electric, T::Steel] } else { &[T::Electric] };
    all.extend(
        line(&["Magnemite", "Magneton"], 1, &[magnet], Color::Gray, Cat::Item, 0)
            .into_iter()
            .map(Species::genderless),
    );
    all.extend(
        line(&["Voltorb", "Electrode"], 1, &[&[T::Electric]], Color::Red, Cat::Item, 0)
            .into_iter()
            .map(Species::genderless),
    );

    let mut eeveelutions = vec!["Vaporeon", "Jolteon", "Flareon"];
    if gen >= 2 {
        eeveelutions.extend(["Espeon", "Umbreon"]);
    }
    all.push(
        Species::new("Eevee", 1, &[T::Normal])
            .with_evolutions(eeveelutions)
            .with_colors(&[Color::Brown])
            .with_categories(&[Cat::Mammal])
            .with_legs(4),
    );
    for (name, ty, color) in [
        ("Vaporeon", T::Water, Color::Blue),
        ("Jolteon", T::Electric, Color::Yellow),
        ("Flareon", T::Fire, Color::Red),
    ] {
        all.push(Species::new(name, 1, &[ty]).with_colors(&[color]).with_categories(&[Cat::Mammal]).with_legs(4));
    }
    if gen >= 2 {
        for (name, ty, color) in [("Espeon", T::Psychic, Color::Purple), ("Umbreon", T::Dark, Color::Black)] {
            all.push(Species::new(name, 2, &[ty]).with_colors(&[color]).with_categories(&[Cat::Cat]).with_legs(4));
        }
    }
    all
}

fn johto() -> Vec<Species> {
    let mut all = Vec::new();
    all.extend(line(&["Chikorita", "Bayleef", "Meganium"], 2, &[&[T::Grass]], Color::Green, Cat::Plant, 4));
    all.extend(line(&["Cyndaquil", "Quilava", "Typhlosion"], 2, &[&[T::Fire]], Color::Yellow, Cat::Rodent, 2));
    all.extend(line(&["Totodile", "Croconaw", "Feraligatr"], 2, &[&[T::Water]], Color::Blue, Cat::Reptile, 2));
    all.extend(line(&["Sentret", "Furret"], 2, &[&[T::Normal]], Color::Brown, Cat::Rodent, 2));
    all.extend(line(&["Hoothoot", "Noctowl"], 2, &[&[T::Normal, T::Flying]], Color::Brown, Cat::Bird, 2));
    all.extend(line(&["Houndour", "Houndoom"], 2, &[&[T::Dark, T::Fire]], Color::Black, Cat::Dog, 4));
    all.push(
        Species::new("Pichu", 2, &[T::Electric])
            .with_evolutions(["Pikachu"])
            .with_colors(&[Color::Yellow])
            .with_categories(&[Cat::Mouse])
            .with_legs(2),
    );
    all
}

fn hoenn() -> Vec<Species> {
    let mut all = Vec::new();
    all.extend(line(&["Treecko", "Grovyle", "Sceptile"], 3, &[&[T::Grass]], Color::Green, Cat::Reptile, 2));
    all.extend(line(
        &["Torchic", "Combusken", "Blaziken"],
        3,
        &[&[T::Fire], &[T::Fire, T::Fighting]],
        Color::Red,
        Cat::Bird,
        2,
    ));
    all.extend(line(
        &["Mudkip", "Marshtomp", "Swampert"],
        3,
        &[&[T::Water], &[T::Water, T::Ground]],
        Color::Blue,
        Cat::Watermon,
        4,
    ));
    all.extend(line(&["Zigzagoon", "Linoone"], 3, &[&[T::Normal]], Color::Brown, Cat::Mammal, 4));
    all.extend(line(&["Aron", "Lairon", "Aggron"], 3, &[&[T::Steel, T::Rock]], Color::Gray, Cat::Prehistoric, 4));
    all.push(
        Species::new("Castform", 3, &[T::Normal])
            .genderless()
            .with_colors(&[Color::Gray])
            .with_categories(&[Cat::Fantasy]),
    );
    all.push(
        Species::new("Deoxys", 3, &[T::Psychic])
            .genderless()
            .with_colors(&[Color::Red])
            .with_categories(&[Cat::Fantasy])
            .with_legs(2),
    );
    all
}

/// Every species available in generation `gen` of the sample catalog.
///
/// Generations above 3 get the generation 3 table.
#[must_use]
pub fn sample_species(gen: u8) -> Vec<Species> {
    let mut all = kanto(gen);
    if gen >= 2 {
        all.extend(johto());
    }
    if gen >= 3 {
        all.extend(hoenn());
    }
    all
}

/// Build the sample catalog with the Red, Gold and Ruby games.
#[must_use]
pub fn sample_pokedex() -> Pokedex {
    let mut dex = Pokedex::new();
    for gen in 1..=3 {
        let mut registry = SpeciesRegistry::new();
        for species in sample_species(gen) {
            registry.register(species);
        }
        dex.insert_generation(gen, registry);
    }

    dex.add_game(
        Game::new("Red", 1, Region::Kanto)
            .with_starters(["Bulbasaur", "Charmander", "Squirtle"])
            .with_trainers(["Brock", "Misty", "Lt. Surge", "Erika", "Koga", "Sabrina", "Blaine", "Giovanni"])
            .with_route("Route 1", ["Pidgey", "Rattata"])
            .with_route("Route 2", ["Pidgey", "Rattata", "Caterpie"])
            .with_route("Viridian Forest", ["Caterpie", "Pikachu", "Pidgey"])
            .with_route("Route 25", ["Abra", "Pidgey"])
            .with_route("Rock Tunnel", ["Geodude", "Machop"])
            .with_route("Power Plant", ["Magnemite", "Voltorb", "Pikachu"])
            .with_route("Pokemon Tower", ["Gastly"])
            .with_route("Celadon City", ["Eevee"])
            .with_route("Seafoam Islands", ["Seel"])
            .with_route("Safari Zone", ["Dratini"]),
    );
    dex.add_game(
        Game::new("Gold", 2, Region::Johto)
            .with_starters(["Chikorita", "Cyndaquil", "Totodile"])
            .with_trainers(["Falkner", "Bugsy", "Whitney", "Morty", "Chuck", "Jasmine", "Pryce", "Clair"])
            .with_route("Route 29", ["Sentret", "Pidgey", "Rattata", "Hoothoot"])
            .with_route("Route 30", ["Caterpie", "Pidgey", "Hoothoot"])
            .with_route("Route 32", ["Rattata", "Geodude", "Pichu"])
            .with_route("Route 7", ["Houndour", "Abra"])
            .with_route("Goldenrod City", ["Eevee"])
            .with_route("Dark Cave", ["Geodude", "Machop"]),
    );
    dex.add_game(
        Game::new("Ruby", 3, Region::Hoenn)
            .with_starters(["Treecko", "Torchic", "Mudkip"])
            .with_trainers(["Roxanne", "Brawly", "Wattson", "Flannery", "Norman", "Winona", "Tate & Liza", "Wallace"])
            .with_route("Route 101", ["Zigzagoon", "Pidgey"])
            .with_route("Route 102", ["Zigzagoon", "Pidgey", "Abra"])
            .with_route("Granite Cave", ["Geodude", "Aron", "Abra"])
            .with_route("New Mauville", ["Magnemite", "Voltorb"])
            .with_route("Weather Institute", ["Castform"])
            .with_route("Birth Island", ["Deoxys"]),
    );
    dex
}
