use clientbook::{Client, ClientError, Field, OutputFormat};
use std::collections::BTreeMap;

fn john() -> Client {
    Client::new("Smith", "John", "", "Main St", "+1-555-123-4567").unwrap()
}

#[test]
fn test_new_keeps_values_unchanged() {
    let client = Client::new("Van Dyke", "Mary Ann", "Lou", "  12 Elm, Apt 3 ", "+44-207-946-0958")
        .unwrap();

    assert_eq!(client.surname(), "Van Dyke");
    assert_eq!(client.name(), "Mary Ann");
    assert_eq!(client.patronymic(), "Lou");
    assert_eq!(client.address(), "  12 Elm, Apt 3 ");
    assert_eq!(client.phone(), "+44-207-946-0958");
}

#[test]
fn test_new_rejects_empty_required_fields() {
    let cases = [
        (Client::new("", "John", "", "Main St", "+1-555-123-4567"), Field::Surname),
        (Client::new("Smith", "   ", "", "Main St", "+1-555-123-4567"), Field::Name),
        (Client::new("Smith", "John", "", "\t", "+1-555-123-4567"), Field::Address),
        (Client::new("Smith", "John", "", "Main St", ""), Field::Phone),
    ];

    for (result, expected) in cases {
        match result {
            Err(ClientError::EmptyField(field)) => assert_eq!(field, expected),
            other => panic!("expected EmptyField({expected}), got {other:?}"),
        }
    }
}

#[test]
fn test_new_rejects_non_letters() {
    let err = Client::new("Sm1th", "John", "", "Main St", "+1-555-123-4567").unwrap_err();
    assert!(matches!(err, ClientError::NonLetterContent(Field::Surname)));
    assert_eq!(err.to_string(), "surname must contain only letters");

    let err = Client::new("Smith", "John", "J.", "Main St", "+1-555-123-4567").unwrap_err();
    assert!(matches!(err, ClientError::NonLetterContent(Field::Patronymic)));
}

#[test]
fn test_new_rejects_bad_phone() {
    let err = Client::new("Smith", "John", "", "Main St", "123-456-7890").unwrap_err();
    match err {
        ClientError::PatternMismatch { field, pattern } => {
            assert_eq!(field, Field::Phone);
            assert_eq!(pattern, clientbook::client::PHONE_PATTERN);
        }
        other => panic!("expected PatternMismatch, got {other:?}"),
    }
}

#[test]
fn test_phone_with_trailing_content_rejected() {
    assert!(Client::new("Smith", "John", "", "Main St", "+1-555-123-4567x").is_err());
}

#[test]
fn test_first_failing_field_reported() {
    let err = Client::new("Sm1th", "", "", "", "bad").unwrap_err();
    assert!(matches!(err, ClientError::NonLetterContent(Field::Surname)));
}

#[test]
fn test_setters_validate() {
    let mut client = john();

    client.set_surname("Jones").unwrap();
    client.set_patronymic("Paul").unwrap();
    client.set_phone("+7-900-123-4567").unwrap();
    assert_eq!(client.surname(), "Jones");
    assert_eq!(client.patronymic(), "Paul");
    assert_eq!(client.phone(), "+7-900-123-4567");

    assert!(matches!(
        client.set_name("J0hn"),
        Err(ClientError::NonLetterContent(Field::Name))
    ));
    assert!(matches!(
        client.set_address(" "),
        Err(ClientError::EmptyField(Field::Address))
    ));
    assert!(client.set_phone("555-1234").is_err());

    // rejected values leave the old ones in place
    assert_eq!(client.name(), "John");
    assert_eq!(client.address(), "Main St");
    assert_eq!(client.phone(), "+7-900-123-4567");
}

#[test]
fn test_from_delimited() {
    let client = Client::from_delimited("Smith,John,,Main St,+1-555-123-4567", ',').unwrap();
    assert_eq!(client, john());
    assert_eq!(client.patronymic(), "");
}

#[test]
fn test_from_delimited_trims_segments() {
    let client =
        Client::from_delimited("  Smith ; John;  ; Main St ;+1-555-123-4567  ", ';').unwrap();
    assert_eq!(client, john());
}

#[test]
fn test_from_str_uses_comma() {
    let client: Client = "Smith,John,,Main St,+1-555-123-4567".parse().unwrap();
    assert_eq!(client, john());
}

#[test]
fn test_from_delimited_wrong_field_count() {
    let err = Client::from_delimited("Smith,John,Main St,+1-555-123-4567", ',').unwrap_err();
    assert!(matches!(
        err,
        ClientError::MalformedRecord {
            expected: 5,
            actual: 4
        }
    ));

    let err = Client::from_delimited("a,b,c,d,e,f", ',').unwrap_err();
    assert!(matches!(
        err,
        ClientError::MalformedRecord {
            expected: 5,
            actual: 6
        }
    ));
}

#[test]
fn test_from_delimited_still_validates_fields() {
    let err = Client::from_delimited("Smith,John,,Main St,555", ',').unwrap_err();
    assert!(matches!(err, ClientError::PatternMismatch { .. }));
}

#[test]
fn test_from_json() {
    let client = Client::from_json(
        r#"{"surname":"Doe","name":"Jane","patronymic":"A","address":"1 Elm","phone":"+1-212-555-0000"}"#,
    )
    .unwrap();
    let direct = Client::new("Doe", "Jane", "A", "1 Elm", "+1-212-555-0000").unwrap();
    assert_eq!(client, direct);
}

#[test]
fn test_from_json_ignores_extra_keys() {
    let client = Client::from_json(
        r#"{"surname":"Doe","name":"Jane","patronymic":"","address":"1 Elm","phone":"+1-212-555-0000","id":7}"#,
    )
    .unwrap();
    assert_eq!(client.surname(), "Doe");
}

#[test]
fn test_from_json_missing_keys() {
    let err = Client::from_json(r#"{"surname":"Doe"}"#).unwrap_err();
    match &err {
        ClientError::MissingKeys(keys) => assert_eq!(
            keys,
            &[Field::Name, Field::Patronymic, Field::Address, Field::Phone]
        ),
        other => panic!("expected MissingKeys, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "Missing keys: name, patronymic, address, phone"
    );
}

#[test]
fn test_from_json_invalid() {
    assert!(matches!(
        Client::from_json("{not json"),
        Err(ClientError::InvalidJson(_))
    ));
    assert!(matches!(
        Client::from_json(r#"["Doe","Jane"]"#),
        Err(ClientError::InvalidJson(_))
    ));

    let err = Client::from_json(
        r#"{"surname":"Doe","name":"Jane","patronymic":null,"address":"1 Elm","phone":"+1-212-555-0000"}"#,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Invalid JSON: patronymic must be a string");
}

#[test]
fn test_from_json_still_validates_fields() {
    let err = Client::from_json(
        r#"{"surname":"D0e","name":"Jane","patronymic":"","address":"1 Elm","phone":"+1-212-555-0000"}"#,
    )
    .unwrap_err();
    assert!(matches!(err, ClientError::NonLetterContent(Field::Surname)));
}

#[test]
fn test_equality() {
    let a = Client::new("Doe", "Jane", "A", "1 Elm", "+1-212-555-0000").unwrap();
    let b = Client::new("Doe", "Jane", "A", "1 Elm", "+1-212-555-0000").unwrap();
    assert_eq!(a, b);

    for field in Field::ALL {
        let mut changed = b.clone();
        let value = match field {
            Field::Phone => "+1-212-555-0001",
            Field::Address => "2 Elm",
            _ => "Other",
        };
        changed.set(field, value).unwrap();
        assert_ne!(a, changed, "changing {field} should break equality");
    }
}

#[test]
fn test_delimited_round_trip() {
    let client = Client::new("Doe", "Jane", "A", "1 Elm", "+1-212-555-0000").unwrap();

    let line = client.to_delimited(',').unwrap();
    assert_eq!(line, "Doe,Jane,A,1 Elm,+1-212-555-0000");
    assert_eq!(Client::from_delimited(&line, ',').unwrap(), client);

    let line = client.to_delimited('|').unwrap();
    assert_eq!(Client::from_delimited(&line, '|').unwrap(), client);

    let line = client.to_delimited('\t').unwrap();
    assert_eq!(line, "Doe\tJane\tA\t1 Elm\t+1-212-555-0000");
    assert_eq!(Client::from_delimited(&line, '\t').unwrap(), client);
}

#[test]
fn test_tab_delimited_with_empty_patronymic() {
    let client = Client::from_delimited("Smith\tJohn\t\tMain St\t+1-555-123-4567", '\t').unwrap();
    assert_eq!(client, john());
    assert_eq!(
        Client::from_delimited(&client.to_delimited('\t').unwrap(), '\t').unwrap(),
        client
    );
}

#[test]
fn test_to_delimited_rejects_unencodable_fields() {
    let client = Client::new("Doe", "Jane", "", "1 Elm, Apt 2", "+1-212-555-0000").unwrap();
    assert!(matches!(
        client.to_delimited(','),
        Err(ClientError::UnencodableField {
            field: Field::Address,
            delimiter: ','
        })
    ));
    assert!(client.to_delimited(';').is_ok());

    let padded = Client::new(" Doe", "Jane", "", "1 Elm", "+1-212-555-0000").unwrap();
    assert!(padded.to_delimited(',').is_err());
}

#[test]
fn test_json_round_trip() {
    let client = Client::new("Doe", "Jane", "", "1 Elm, Apt 2", "+1-212-555-0000").unwrap();
    assert_eq!(Client::from_json(&client.to_json()).unwrap(), client);
}

#[test]
fn test_display() {
    let rendered = john().to_string();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines,
        [
            "Surname:    Smith",
            "Name:       John",
            "Patronymic: -",
            "Address:    Main St",
            "Phone:      +1-555-123-4567",
        ]
    );
}

#[test]
fn test_display_blank_patronymic_uses_placeholder() {
    let client = Client::new("Smith", "John", "   ", "Main St", "+1-555-123-4567").unwrap();
    assert!(client.to_string().lines().any(|l| l == "Patronymic: -"));
}

#[test]
fn test_new_rejects_letter_numbers() {
    let err = Client::new("Ⅻ", "John", "", "Main St", "+1-555-123-4567").unwrap_err();
    assert!(matches!(err, ClientError::NonLetterContent(Field::Surname)));

    let err = Client::new("Smith", "John", "\u{0345}", "Main St", "+1-555-123-4567").unwrap_err();
    assert!(matches!(err, ClientError::NonLetterContent(Field::Patronymic)));
}

#[test]
fn test_summary() {
    assert_eq!(john().summary().to_string(), "Client(John Smith)");
}

#[test]
fn test_output_format_render() {
    let client = john();
    assert_eq!(
        OutputFormat::Delimited.render(&client, ';').unwrap(),
        "Smith;John;;Main St;+1-555-123-4567"
    );
    assert_eq!(
        OutputFormat::Json.render(&client, ',').unwrap(),
        client.to_json()
    );
    assert_eq!(
        OutputFormat::Text.render(&client, ',').unwrap(),
        client.to_string()
    );
}

#[test]
fn test_toml_book_is_validated() {
    let book: BTreeMap<String, Client> = toml::from_str(
        r#"
[jane]
surname = "Doe"
name = "Jane"
address = "1 Elm"
phone = "+1-212-555-0000"
"#,
    )
    .unwrap();
    assert_eq!(book["jane"].patronymic(), "");

    let err = toml::from_str::<BTreeMap<String, Client>>(
        r#"
[jane]
surname = "Doe"
name = "Jane"
address = "1 Elm"
phone = "555"
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("phone is invalid"));
}
