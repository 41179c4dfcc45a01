#![allow(non_snake_case, dead_code)]

use pretty_assertions::assert_eq;
use tests::*;

#[derive(Model)]
struct HasMany {
    ID: i64,
    MyStructID: u64,
    Name: String,
}

#[test]
fn has_many_by_convention() {
    #[derive(Model)]
    struct MyStruct {
        ID: i64,
        Name: String,
        HasMany: Vec<HasMany>,
    }

    let schema = resolve::<MyStruct>();

    assert_fields(
        &schema,
        vec![
            field("ID", "id").primary_key(),
            field("Name", "name"),
            relation(
                "HasMany",
                "has_many",
                relationship::<HasMany>(RelationKind::HasMany, &["my_struct_id"], &["id"]),
            ),
        ],
    );
}

#[test]
fn has_many_with_foreign_key_override() {
    #[derive(Model)]
    struct Post {
        ID: u64,
        AuthorID: u64,
        Title: String,
    }

    #[derive(Model)]
    struct User {
        ID: u64,
        #[relate("foreignkey:AuthorID")]
        Posts: Vec<Post>,
    }

    let schema = resolve::<User>();

    assert_fields(
        &schema,
        vec![
            field("ID", "id").primary_key(),
            relation(
                "Posts",
                "posts",
                relationship::<Post>(RelationKind::HasMany, &["author_id"], &["id"]),
            )
            .tag("FOREIGNKEY", "AuthorID"),
        ],
    );
}

#[test]
fn has_many_with_default_foreign_key() {
    #[derive(Model)]
    struct Post {
        ID: u64,
        Title: String,
    }

    #[derive(Model)]
    struct User {
        ID: u64,
        Posts: Vec<Post>,
    }

    let schema = resolve::<User>();

    assert_eq!(
        schema.field("Posts").unwrap().relationship,
        Some(relationship::<Post>(RelationKind::HasMany, &["user_id"], &["id"]))
    );
    assert_eq!(schema.db_names().collect::<Vec<_>>(), ["id"]);
}

#[test]
fn has_many_references_association_key() {
    #[derive(Model)]
    struct Order {
        ID: u64,
        CustomerNumber: String,
    }

    #[derive(Model)]
    struct Customer {
        ID: u64,
        Number: String,
        #[relate("foreignkey:CustomerNumber;associationforeignkey:Number")]
        Orders: Vec<Order>,
    }

    let schema = resolve::<Customer>();

    assert_eq!(
        schema.field("Orders").unwrap().relationship,
        Some(relationship::<Order>(RelationKind::HasMany, &["customer_number"], &["number"]))
    );
}

#[test]
fn explicit_has_many_with_boxed_items() {
    #[derive(Model)]
    struct Line {
        ID: u64,
        InvoiceID: u64,
    }

    #[derive(Model)]
    struct Invoice {
        ID: u64,
        #[relate("rel:has_many")]
        Lines: Vec<Box<Line>>,
    }

    let schema = resolve::<Invoice>();

    assert_eq!(
        schema.field("Lines").unwrap().relationship,
        Some(relationship::<Line>(RelationKind::HasMany, &["invoice_id"], &["id"]))
    );
}

#[test]
fn relationships_in_declaration_order() {
    #[derive(Model)]
    struct Comment {
        ID: u64,
        ArticleID: u64,
    }

    #[derive(Model)]
    struct Tag {
        ID: u64,
        ArticleID: u64,
    }

    #[derive(Model)]
    struct Article {
        ID: u64,
        Comments: Vec<Comment>,
        Title: String,
        Tags: Vec<Tag>,
    }

    let schema = resolve::<Article>();

    let names: Vec<_> = schema
        .relationships()
        .map(|(field, relationship)| (field.name.as_str(), relationship.kind))
        .collect();

    assert_eq!(
        names,
        [
            ("Comments", RelationKind::HasMany),
            ("Tags", RelationKind::HasMany),
        ]
    );
}
