use anyhow::Result;
use chrono::NaiveDate;
use shared::{Owner, Pet, Visit};
use tracing::info;

use super::connection::DbConnection;
use crate::storage::traits::{Connection, OwnerStorage, PetStorage, VisitStorage};

struct DemoPet {
    name: &'static str,
    birth_date: (i32, u32, u32),
    type_name: &'static str,
    visits: &'static [((i32, u32, u32), &'static str)],
}

struct DemoOwner {
    first_name: &'static str,
    last_name: &'static str,
    address: &'static str,
    city: &'static str,
    telephone: &'static str,
    pets: &'static [DemoPet],
}

const DEMO_OWNERS: &[DemoOwner] = &[
    DemoOwner {
        first_name: "George",
        last_name: "Franklin",
        address: "110 W. Liberty St.",
        city: "Madison",
        telephone: "6085551023",
        pets: &[DemoPet { name: "Leo", birth_date: (2010, 9, 7), type_name: "cat", visits: &[] }],
    },
    DemoOwner {
        first_name: "Betty",
        last_name: "Davis",
        address: "638 Cardinal Ave.",
        city: "Sun Prairie",
        telephone: "6085551749",
        pets: &[DemoPet { name: "Basil", birth_date: (2012, 8, 6), type_name: "hamster", visits: &[] }],
    },
    DemoOwner {
        first_name: "Eduardo",
        last_name: "Rodriquez",
        address: "2693 Commerce St.",
        city: "McFarland",
        telephone: "6085558763",
        pets: &[
            DemoPet { name: "Jewel", birth_date: (2010, 3, 7), type_name: "dog", visits: &[] },
            DemoPet { name: "Rosy", birth_date: (2011, 4, 17), type_name: "dog", visits: &[] },
        ],
    },
    DemoOwner {
        first_name: "Jean",
        last_name: "Coleman",
        address: "105 N. Lake St.",
        city: "Monona",
        telephone: "6085552654",
        pets: &[
            DemoPet {
                name: "Max",
                birth_date: (2012, 9, 4),
                type_name: "cat",
                visits: &[((2013, 1, 2), "rabies shot"), ((2013, 1, 4), "neutered")],
            },
            DemoPet {
                name: "Samantha",
                birth_date: (2012, 9, 4),
                type_name: "cat",
                visits: &[((2013, 1, 1), "rabies shot"), ((2013, 1, 3), "spayed")],
            },
        ],
    },
];

fn ymd((year, month, day): (i32, u32, u32)) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow::anyhow!("Invalid demo date {}-{}-{}", year, month, day))
}

/// Insert demo owners, pets and visits when the database has no owners.
/// Returns whether anything was inserted.
pub async fn seed_demo_data(db: &DbConnection) -> Result<bool> {
    let owners = db.create_owner_repository();
    if owners.count().await? > 0 {
        return Ok(false);
    }

    let pets = db.create_pet_repository();
    let visits = db.create_visit_repository();

    for demo in DEMO_OWNERS {
        let owner = owners
            .save(&Owner::new(demo.first_name, demo.last_name, demo.address, demo.city, demo.telephone))
            .await?;

        for demo_pet in demo.pets {
            let mut pet = Pet::new(demo_pet.name, ymd(demo_pet.birth_date)?, demo_pet.type_name);
            pet.owner_id = owner.id;
            let mut pet = pets.save(&pet).await?;

            for (date, description) in demo_pet.visits {
                let index = pet.add_visit(Visit::new(ymd(*date)?, description));
                visits.save(&pet.visits()[index]).await?;
            }
        }
    }

    info!("Seeded {} demo owners", DEMO_OWNERS.len());
    Ok(true)
}
