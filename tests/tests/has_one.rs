#![allow(non_snake_case, dead_code)]

use pretty_assertions::assert_eq;
use tests::*;

#[test]
fn has_one_by_convention() {
    #[derive(Model)]
    struct HasOne {
        ID: i64,
        Name: String,
        MyStructID: u64,
    }

    #[derive(Model)]
    struct MyStruct {
        ID: i64,
        Name: String,
        HasOne: HasOne,
    }

    let schema = resolve::<MyStruct>();

    assert_fields(
        &schema,
        vec![
            field("ID", "id").primary_key(),
            field("Name", "name"),
            relation(
                "HasOne",
                "has_one",
                relationship::<HasOne>(RelationKind::HasOne, &["my_struct_id"], &["id"]),
            ),
        ],
    );
}

#[test]
fn has_one_references_renamed_primary_key() {
    #[derive(Model)]
    struct HasOne2 {
        ID: i64,
        Name: String,
        MyStruct2ID: u64,
    }

    #[derive(Model)]
    struct MyStruct2 {
        #[relate("column:my_id")]
        ID: i64,
        Name: String,
        HasOne: HasOne2,
    }

    let schema = resolve::<MyStruct2>();

    assert_fields(
        &schema,
        vec![
            field("ID", "my_id").primary_key().tag("COLUMN", "my_id"),
            field("Name", "name"),
            relation(
                "HasOne",
                "has_one",
                relationship::<HasOne2>(RelationKind::HasOne, &["my_struct2_id"], &["my_id"]),
            ),
        ],
    );
}

#[test]
fn has_one_with_foreign_key_override() {
    #[derive(Model)]
    struct HasOne3 {
        #[relate("column:my_id")]
        ID: i64,
        HasOneKey: u64,
        Name: String,
    }

    #[derive(Model)]
    struct MyStruct3 {
        ID: i64,
        Name: String,
        #[relate("foreignkey:HasOneKey")]
        HasOne: HasOne3,
    }

    let schema = resolve::<MyStruct3>();

    assert_fields(
        &schema,
        vec![
            field("ID", "id").primary_key(),
            field("Name", "name"),
            relation(
                "HasOne",
                "has_one",
                relationship::<HasOne3>(RelationKind::HasOne, &["has_one_key"], &["id"]),
            )
            .tag("FOREIGNKEY", "HasOneKey"),
        ],
    );
}

#[test]
fn explicit_has_one_uses_default_foreign_key_name() {
    #[derive(Model)]
    struct Profile {
        ID: i64,
        Bio: String,
    }

    #[derive(Model)]
    struct User {
        ID: i64,
        #[relate("rel:has_one")]
        Profile: Profile,
    }

    let schema = resolve::<User>();

    assert_eq!(
        schema.field("Profile").unwrap().relationship,
        Some(relationship::<Profile>(RelationKind::HasOne, &["user_id"], &["id"]))
    );
    // The key lives on `Profile`, so nothing is added to `User`.
    assert_eq!(schema.fields.len(), 2);
}

#[test]
fn renamed_primary_key_changes_default_foreign_key_name() {
    #[derive(Model)]
    struct Profile {
        ID: i64,
    }

    #[derive(Model)]
    struct User {
        #[relate("column:user_key")]
        ID: i64,
        #[relate("rel:has_one")]
        Profile: Profile,
    }

    let schema = resolve::<User>();

    assert_eq!(
        schema.field("Profile").unwrap().relationship,
        Some(relationship::<Profile>(
            RelationKind::HasOne,
            &["user_user_key"],
            &["user_key"],
        ))
    );
}

#[test]
fn belongs_to_wins_when_both_sides_match() {
    #[derive(Model)]
    struct Passport {
        ID: i64,
        PersonID: i64,
    }

    #[derive(Model)]
    struct Person {
        ID: i64,
        PassportID: i64,
        Passport: Passport,
    }

    let schema = resolve::<Person>();

    assert_eq!(
        schema.field("Passport").unwrap().relationship,
        Some(relationship::<Passport>(RelationKind::BelongsTo, &["passport_id"], &["id"]))
    );
    assert!(schema.field("PassportID").unwrap().is_foreign_key);
}

#[test]
fn explicit_has_one_overrides_belongs_to_convention() {
    #[derive(Model)]
    struct Passport {
        ID: i64,
        PersonID: i64,
    }

    #[derive(Model)]
    struct Person {
        ID: i64,
        PassportID: i64,
        #[relate("rel:has_one")]
        Passport: Passport,
    }

    let schema = resolve::<Person>();

    assert_eq!(
        schema.field("Passport").unwrap().relationship,
        Some(relationship::<Passport>(RelationKind::HasOne, &["person_id"], &["id"]))
    );
    assert!(!schema.field("PassportID").unwrap().is_foreign_key);
}

#[test]
fn foreign_key_override_on_both_sides_prefers_owner() {
    #[derive(Model)]
    struct Engine {
        ID: u64,
        EngineKey: u64,
    }

    #[derive(Model)]
    struct Car {
        ID: u64,
        EngineKey: u64,
        #[relate("foreignkey:EngineKey")]
        Engine: Engine,
    }

    let schema = resolve::<Car>();

    assert_eq!(
        schema.field("Engine").unwrap().relationship,
        Some(relationship::<Engine>(RelationKind::BelongsTo, &["engine_key"], &["id"]))
    );
    assert!(schema.field("EngineKey").unwrap().is_foreign_key);
}
