use crate::types::{ClothingItem, Gender, Profile, Team};

fn item(name: &str, primary: &str) -> Option<ClothingItem> {
    Some(ClothingItem {
        name: name.to_string(),
        primary: primary.to_string(),
        secondary: None,
    })
}

fn item2(name: &str, primary: &str, secondary: &str) -> Option<ClothingItem> {
    Some(ClothingItem {
        name: name.to_string(),
        primary: primary.to_string(),
        secondary: Some(secondary.to_string()),
    })
}

pub fn prime_color(team: Team) -> &'static str {
    match team {
        Team::Team1 => "ClothingDarkGray",
        Team::Team2 => "ClothingDarkYellow",
        Team::Team3 => "ClothingLightOrange",
        Team::Team4 => "ClothingLightGray",
        Team::Independent => "",
    }
}

/// Random pool for main bots in the militia loadout.
pub fn soldier_profiles(team: Team) -> Vec<Profile> {
    let prime = prime_color(team);
    let sniper = |skin: &str| Profile {
        skin: item2("Normal", skin, "ClothingLightGray"),
        chest_over: item("AmmoBelt", prime),
        chest_under: item("TShirt", prime),
        hands: item("Gloves", "ClothingGray"),
        waist: item("AmmoBeltWaist", "ClothingGray"),
        legs: item2("CamoPants", "ClothingDarkGreen", prime),
        feet: item("BootsBlack", prime),
        accessory: item2("Vizor", prime, "ClothingLightRed"),
        ..Profile::named("Sniper", Gender::Male)
    };
    vec![
        Profile {
            skin: item2("Tattoos", "Skin4", "ClothingLightYellow"),
            head: item("Helmet", prime),
            chest_under: item2("MilitaryShirt", prime, "ClothingLightBlue"),
            waist: item("SatchelBelt", prime),
            legs: item2("CamoPants", prime, prime),
            feet: item("BootsBlack", prime),
            ..Profile::named("Soldier", Gender::Male)
        },
        sniper("Skin2"),
        sniper("Skin1"),
    ]
}

pub fn general_profile(team: Team) -> Profile {
    let prime = prime_color(team);
    Profile {
        skin: item2("Tattoos", "Skin3", "ClothingLightYellow"),
        head: item("GeneralHat", prime),
        chest_under: item2("LeatherJacket", prime, "ClothingLightYellow"),
        waist: item("Sash", prime),
        legs: item2("CamoPants", prime, prime),
        feet: item("BootsBlack", "ClothingGray"),
        accessory: item("Armband", "ClothingLightYellow"),
        ..Profile::named("General", Gender::Male)
    }
}

pub fn rookie_profile(team: Team) -> Profile {
    let prime = prime_color(team);
    Profile {
        skin: item2("Tattoos_fem", "Skin3", "ClothingLightYellow"),
        head: item2("PithHelmet", prime, "ClothingLightGray"),
        chest_under: item2("ShirtWithBowtie_fem", prime, "ClothingLightGray"),
        waist: item("SatchelBelt_fem", prime),
        legs: item("Shorts_fem", prime),
        feet: item("BootsBlack", "ClothingGray"),
        ..Profile::named("Rookie", Gender::Female)
    }
}

pub fn captain_profile(team: Team) -> Profile {
    let prime = prime_color(team);
    Profile {
        skin: item2("Tattoos", "Skin3", "ClothingLightYellow"),
        head: item2("StylishHat", prime, "ClothingLightGray"),
        chest_under: item2("ShirtWithBowtie", prime, "ClothingLightGray"),
        waist: item("SatchelBelt", prime),
        legs: item("Pants", prime),
        feet: item("BootsBlack", "ClothingGray"),
        ..Profile::named("Captain", Gender::Male)
    }
}

pub fn artillery_profile(team: Team) -> Profile {
    Profile {
        skin: item2("MechSkin", prime_color(team), "ClothingLightGray"),
        ..Profile::named("Artillery", Gender::Male)
    }
}

pub fn timpa_profile() -> Profile {
    Profile {
        skin: item2("Normal", "Skin1", "ClothingLightGray"),
        head: item("Buzzcut", "ClothingDarkGray"),
        chest_under: item("SleevelessShirt", "ClothingGreen"),
        legs: item("Skirt", "ClothingBlue"),
        feet: item("ShoesBlack", "ClothingBrown"),
        ..Profile::named("Timpa", Gender::Male)
    }
}

pub fn bichi_profile() -> Profile {
    Profile {
        skin: item2("Normal", "Skin3", "ClothingLightGreen"),
        chest_under: item("Sweater", "ClothingGreen"),
        hands: item("GlovesBlack", "ClothingLightGray"),
        legs: item("PantsBlack", "ClothingBlue"),
        feet: item("ShoesBlack", "ClothingBrown"),
        ..Profile::named("Bichi", Gender::Male)
    }
}

pub fn kokola_profile() -> Profile {
    Profile {
        skin: item2("Normal_fem", "Skin4", "ClothingLightGreen"),
        head: item("Buzzcut", "ClothingDarkGray"),
        chest_under: item("SleevelessShirt_fem", "ClothingLightGray"),
        legs: item("Skirt_fem", "ClothingBlue"),
        feet: item("ShoesBlack", "ClothingBrown"),
        ..Profile::named("Kokola", Gender::Female)
    }
}

pub fn edur_profile() -> Profile {
    Profile {
        skin: item("BearSkin", ""),
        chest_under: item("Shirt", "ClothingLightGray"),
        legs: item("PantsBlack", "ClothingDarkGray"),
        feet: item("ShoesBlack", "ClothingBrown"),
        ..Profile::named("Edur", Gender::Male)
    }
}

pub fn xray_profile() -> Profile {
    Profile {
        skin: item2("Normal_fem", "Skin1", "ClothingLightGreen"),
        head: item("Buzzcut", "ClothingDarkGray"),
        chest_under: item("SleevelessShirt_fem", "ClothingLightGray"),
        legs: item("Skirt_fem", "ClothingBlue"),
        feet: item("ShoesBlack", "ClothingBrown"),
        accessory: item2("Glasses", "ClothingLightGray", "ClothingLightGray"),
        ..Profile::named("Xray", Gender::Female)
    }
}

pub fn pakhi_profile() -> Profile {
    Profile {
        skin: item2("Normal_fem", "Skin3", "ClothingLightGreen"),
        head: item("SantaHat", "ClothingLightGray"),
        chest_over: item2("Coat_fem", "ClothingLightGray", "ClothingLightGray"),
        chest_under: item("SleevelessShirt_fem", "ClothingLightGray"),
        legs: item("Skirt_fem", "ClothingBlue"),
        feet: item("ShoesBlack", "ClothingBrown"),
        ..Profile::named("Pakhi", Gender::Female)
    }
}

pub fn psythic_full_profile() -> Profile {
    Profile {
        skin: item2("Normal", "Skin1", "ClothingBrown"),
        head: item2("AviatorHat2", "ClothingDarkGray", "ClothingLightBrown"),
        ..Profile::named("Psythic_full", Gender::Male)
    }
}

pub fn psythic_hungry_profile() -> Profile {
    Profile {
        skin: item2("Normal_fem", "Skin1", "ClothingBrown"),
        head: item2("AviatorHat2_fem", "ClothingDarkGray", "ClothingLightBrown"),
        ..Profile::named("Psythic", Gender::Female)
    }
}

/// Worn while the Susano guardian is manifested.
pub fn susano_profile(gender: Gender) -> Profile {
    let skin = match gender {
        Gender::Male => "Normal",
        Gender::Female => "Normal_fem",
    };
    Profile {
        skin: item2(skin, "Skin1", "ClothingPurple"),
        chest_over: item2("Coat", "ClothingPurple", "ClothingDarkPurple"),
        accessory: item("DevilMask", "ClothingPurple"),
        ..Profile::named("Susano", gender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_profiles_carry_the_prime_color() {
        for team in Team::PLAYABLE {
            let prime = prime_color(team);
            let general = general_profile(team);
            assert_eq!(general.head.as_ref().map(|head| head.primary.as_str()), Some(prime));
            for profile in soldier_profiles(team) {
                assert_eq!(
                    profile.feet.as_ref().map(|feet| feet.primary.as_str()),
                    Some(prime)
                );
            }
        }
    }

    #[test]
    fn psythic_states_switch_gender() {
        assert_eq!(psythic_full_profile().gender, Gender::Male);
        assert_eq!(psythic_hungry_profile().gender, Gender::Female);
        assert_ne!(psythic_full_profile().name, psythic_hungry_profile().name);
    }
}
