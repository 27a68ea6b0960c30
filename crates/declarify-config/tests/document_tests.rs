use declarify_config::{ConfigDocument, EncodedValue, Encoding, IniValue};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const SETUP_CFG: &str = "\
# Project metadata
[metadata]
name = demo
version = attr: demo.__version__
long_description = file: README.md
long_description_content_type = text/markdown

[options]
packages = find:
install_requires =
    requests>=2
    click

[options.packages.find]
exclude =
    tests

[bdist_wheel]
universal = 1
";

#[test]
fn existing_setup_cfg_round_trips() {
    let doc = ConfigDocument::parse(SETUP_CFG).unwrap();
    assert_eq!(doc.serialize(), SETUP_CFG);
    assert_eq!(
        doc.sections().collect::<Vec<_>>(),
        vec!["metadata", "options", "options.packages.find", "bdist_wheel"]
    );
    assert_eq!(
        doc.get("options", "install_requires").as_deref(),
        Some("requests>=2\nclick")
    );
    assert_eq!(
        doc.get("metadata", "version").as_deref(),
        Some("attr: demo.__version__")
    );
}

#[test]
fn edits_touch_only_their_entries() {
    let mut doc = ConfigDocument::parse(SETUP_CFG).unwrap();
    let name = Encoding::Plain.encode(&IniValue::Text("renamed".into())).unwrap();
    let python = Encoding::Plain.encode(&IniValue::Text(">=3.8".into())).unwrap();
    doc.set("metadata", "name", &name);
    doc.set("options", "python_requires", &python);

    let expected = SETUP_CFG
        .replace("name = demo", "name = renamed")
        .replace("    click\n", "    click\npython_requires = >=3.8\n");
    assert_eq!(doc.serialize(), expected);
}

#[test]
fn migration_into_fresh_document() {
    let mut doc = ConfigDocument::parse("").unwrap();
    let entries = [
        ("metadata", "name", Encoding::Plain, IniValue::Text("demo".into())),
        (
            "metadata",
            "classifiers",
            Encoding::ListSemicolon,
            IniValue::List(vec!["A :: B".into(), "C :: D".into()]),
        ),
        (
            "metadata",
            "project_urls",
            Encoding::Map,
            IniValue::Map(vec![("Docs".into(), "https://d".into())]),
        ),
        (
            "options",
            "include_package_data",
            Encoding::Boolean,
            IniValue::Bool(true),
        ),
    ];
    for (section, key, encoding, value) in &entries {
        doc.set(section, key, &encoding.encode(value).unwrap());
    }
    assert_eq!(
        doc.serialize(),
        "[metadata]\n\
         name = demo\n\
         classifiers = A :: B;C :: D\n\
         project_urls =\n    Docs = https://d\n\
         \n\
         [options]\n\
         include_package_data = true\n"
    );
}

#[test]
fn values_that_read_back_as_comments_are_never_written() {
    let mut doc = ConfigDocument::parse("[metadata]\nname = demo\n").unwrap();
    for text in ["Bindings for C # and F #", "Demo\n# Install\npip install demo"] {
        assert!(Encoding::Plain.encode(&IniValue::Text(text.into())).is_err());
    }

    let accepted = Encoding::Plain
        .encode(&IniValue::Text("Bindings for C# and F#".into()))
        .unwrap();
    doc.set("metadata", "description", &accepted);
    let once = doc.serialize();
    doc.set("metadata", "description", &accepted);
    assert_eq!(doc.serialize(), once);
    assert_eq!(
        ConfigDocument::parse(&once).unwrap().get("metadata", "description").as_deref(),
        Some("Bindings for C# and F#")
    );
}

#[test]
fn multi_line_value_reads_back_unchanged() {
    let text = "Demo\n\n  Install with pip install demo #1\nDone";
    let mut doc = ConfigDocument::parse("").unwrap();
    doc.set(
        "metadata",
        "long_description",
        &Encoding::Plain.encode(&IniValue::Text(text.into())).unwrap(),
    );
    let reparsed = ConfigDocument::parse(&doc.serialize()).unwrap();
    assert_eq!(
        reparsed.get("metadata", "long_description").as_deref(),
        Some("Demo\n\nInstall with pip install demo #1\nDone")
    );
}

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,8}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .>=<_/-]{0,16}".prop_map(|s| s.trim().to_string())
}

fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z ]{0,10}".prop_map(|c| format!("# {c}")),
        (key_strategy(), value_strategy()).prop_map(|(k, v)| format!("{k} = {v}")),
        value_strategy().prop_map(|v| format!("    {v}")),
    ]
}

/// Documents built from arbitrary sections of arbitrary lines; keys are
/// made unique per section so every generated text parses
fn document_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(prop::collection::vec(line_strategy(), 0..8), 0..4),
        prop_oneof![Just("\n"), Just("\r\n")],
        any::<bool>(),
    )
        .prop_map(|(sections, newline, final_newline)| {
            let mut lines = Vec::new();
            for (index, body) in sections.into_iter().enumerate() {
                lines.push(format!("[section{index}]"));
                let mut has_entry = false;
                for (n, line) in body.into_iter().enumerate() {
                    if line.starts_with(' ') {
                        // continuation lines need an entry to belong to
                        if has_entry {
                            lines.push(line);
                        }
                    } else if let Some((key, value)) = line.split_once(" = ") {
                        has_entry = true;
                        lines.push(format!("{key}_{n} = {value}"));
                    } else {
                        lines.push(line);
                    }
                }
            }
            let mut text = lines.join(newline);
            if final_newline && !text.is_empty() {
                text.push_str(newline);
            }
            text
        })
}

fn encoded_strategy() -> impl Strategy<Value = EncodedValue> {
    prop_oneof![
        value_strategy().prop_map(|v| Encoding::Plain.encode(&IniValue::Text(v)).unwrap()),
        "[A-Za-z#; \n]{0,20}".prop_filter_map("reads back as a comment", |v| {
            Encoding::Plain.encode(&IniValue::Text(v)).ok()
        }),
        prop::collection::vec("[a-z0-9>=.]{1,8}", 0..4)
            .prop_map(|items| Encoding::ListSemicolon.encode(&IniValue::List(items)).unwrap()),
        prop::collection::vec(("[A-Za-z]{1,6}", "[a-z:/.]{1,10}"), 1..3)
            .prop_map(|pairs| Encoding::Map.encode(&IniValue::Map(pairs)).unwrap()),
        any::<bool>().prop_map(|b| Encoding::Boolean.encode(&IniValue::Bool(b)).unwrap()),
    ]
}

proptest! {
    #[test]
    fn prop_unmutated_documents_round_trip(text in document_strategy()) {
        let doc = ConfigDocument::parse(&text).unwrap();
        prop_assert_eq!(doc.serialize(), text);
    }

    #[test]
    fn prop_set_is_idempotent(
        text in document_strategy(),
        section in prop_oneof![Just("section0".to_string()), Just("fresh".to_string())],
        key in key_strategy(),
        value in encoded_strategy(),
    ) {
        let mut doc = ConfigDocument::parse(&text).unwrap();
        doc.set(&section, &key, &value);
        let once = doc.serialize();
        doc.set(&section, &key, &value);
        prop_assert_eq!(doc.serialize(), once.clone());

        let reparsed = ConfigDocument::parse(&once).unwrap();
        prop_assert_eq!(reparsed.get(&section, &key), Some(value.logical()));
    }
}
