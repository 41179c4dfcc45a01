#![allow(non_snake_case, dead_code)]

use pretty_assertions::assert_eq;
use relate::Polymorphic;
use tests::*;

fn polymorphic(
    mut relationship: relate::Relationship,
    type_field: &str,
    db_name: &str,
    value: &str,
) -> relate::Relationship {
    relationship.polymorphic = Some(Polymorphic {
        type_field: type_field.to_string(),
        db_name: db_name.to_string(),
        value: value.to_string(),
    });
    relationship
}

#[test]
fn polymorphic_has_one() {
    #[derive(Model)]
    struct HasOne {
        ID: i64,
        Name: String,
        OwnerType: String,
        OwnerID: String,
    }

    #[derive(Model)]
    struct MyStruct {
        ID: i64,
        Name: String,
        #[relate("polymorphic:Owner")]
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
                polymorphic(
                    relationship::<HasOne>(RelationKind::HasOne, &["owner_id"], &["id"]),
                    "OwnerType",
                    "owner_type",
                    "my_struct",
                ),
            )
            .tag("POLYMORPHIC", "Owner"),
        ],
    );
}

#[test]
fn polymorphic_has_many() {
    #[derive(Model)]
    struct Comment {
        ID: u64,
        Body: String,
        CommentableType: String,
        CommentableID: u64,
    }

    #[derive(Model)]
    struct Post {
        ID: u64,
        #[relate("polymorphic:Commentable")]
        Comments: Vec<Comment>,
    }

    let schema = resolve::<Post>();

    assert_eq!(
        schema.field("Comments").unwrap().relationship,
        Some(polymorphic(
            relationship::<Comment>(RelationKind::HasMany, &["commentable_id"], &["id"]),
            "CommentableType",
            "commentable_type",
            "post",
        ))
    );
}

#[test]
fn polymorphic_type_column_override() {
    #[derive(Model)]
    struct Toy {
        ID: u64,
        #[relate("column:kind")]
        OwnerType: String,
        #[relate("column:owner_ref")]
        OwnerID: u64,
    }

    #[derive(Model)]
    struct Dog {
        ID: u64,
        #[relate("polymorphic:Owner")]
        Toys: Vec<Toy>,
    }

    let schema = resolve::<Dog>();

    assert_eq!(
        schema.field("Toys").unwrap().relationship,
        Some(polymorphic(
            relationship::<Toy>(RelationKind::HasMany, &["owner_ref"], &["id"]),
            "OwnerType",
            "kind",
            "dog",
        ))
    );
}

#[test]
fn polymorphic_defaults_when_fields_are_missing() {
    #[derive(Model)]
    struct Picture {
        ID: u64,
    }

    #[derive(Model)]
    struct UserAccount {
        ID: u64,
        #[relate("polymorphic:Imageable")]
        Avatar: Picture,
    }

    let schema = resolve::<UserAccount>();

    assert_eq!(
        schema.field("Avatar").unwrap().relationship,
        Some(polymorphic(
            relationship::<Picture>(RelationKind::HasOne, &["imageable_id"], &["id"]),
            "ImageableType",
            "imageable_type",
            "user_account",
        ))
    );
    assert_eq!(schema.fields.len(), 2);
}
