//! Tests for the ABI decoder

use serde_json::{json, Value};

use super::*;
use crate::errors::DecodeError;
use crate::serialization::{string_to_name, ByteCursor};

fn abi(doc: Value) -> AbiDocument {
    serde_json::from_value(doc).unwrap()
}

fn name_bytes(name: &str) -> [u8; 8] {
    string_to_name(name).unwrap().to_le_bytes()
}

fn keys(map: &serde_json::Map<String, Value>) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
}

#[test]
fn test_fields_in_declared_order() {
    let abi = abi(json!({
        "structs": [{ "name": "pair", "base": "", "fields": [
            { "name": "b_second", "type": "uint32" },
            { "name": "a_first", "type": "string" }
        ]}],
        "actions": [{ "name": "setpair", "type": "pair" }]
    }));
    let mut data = 42u32.to_le_bytes().to_vec();
    data.extend_from_slice(&[3, b'f', b'o', b'o']);

    let fields = decode_action_data(&abi, "setpair", &data).unwrap();

    assert_eq!(keys(&fields), vec!["b_second", "a_first"]);
    assert_eq!(fields["b_second"], json!(42));
    assert_eq!(fields["a_first"], json!("foo"));
}

#[test]
fn test_base_fields_precede_derived() {
    let abi = abi(json!({
        "structs": [
            { "name": "derived", "base": "middle", "fields": [{ "name": "y", "type": "uint8" }] },
            { "name": "middle", "base": "root", "fields": [{ "name": "x", "type": "uint8" }] },
            { "name": "root", "base": "", "fields": [{ "name": "w", "type": "uint8" }] }
        ],
        "actions": [{ "name": "act", "type": "derived" }]
    }));

    let fields = decode_action_data(&abi, "act", &[1, 2, 3]).unwrap();

    assert_eq!(keys(&fields), vec!["w", "x", "y"]);
    assert_eq!(fields["w"], json!(1));
    assert_eq!(fields["x"], json!(2));
    assert_eq!(fields["y"], json!(3));
}

#[test]
fn test_truncated_payload() {
    let abi = abi(json!({
        "structs": [{ "name": "s", "fields": [
            { "name": "a", "type": "uint32" },
            { "name": "b", "type": "uint64" }
        ]}],
        "actions": [{ "name": "act", "type": "s" }]
    }));

    let result = decode_action_data(&abi, "act", &[1, 0, 0, 0, 9, 9]);
    assert!(matches!(result, Err(DecodeError::TruncatedBuffer { needed: 8, remaining: 2, offset: 4 })));
}

#[test]
fn test_unknown_action() {
    let abi = abi(json!({
        "structs": [{ "name": "s", "fields": [] }],
        "actions": [{ "name": "act", "type": "s" }]
    }));

    match decode_action_data(&abi, "other", &[]) {
        Err(DecodeError::UnknownAction(name)) => assert_eq!(name, "other"),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_unknown_struct() {
    let abi = abi(json!({ "actions": [{ "name": "act", "type": "missing" }] }));

    assert!(matches!(decode_action_data(&abi, "act", &[]), Err(DecodeError::UnknownStruct(s)) if s == "missing"));
}

#[test]
fn test_unknown_base_struct() {
    let abi = abi(json!({
        "structs": [{ "name": "s", "base": "gone", "fields": [] }],
        "actions": [{ "name": "act", "type": "s" }]
    }));

    assert!(matches!(decode_action_data(&abi, "act", &[]), Err(DecodeError::UnknownStruct(s)) if s == "gone"));
}

#[test]
fn test_unsupported_type_fails_whole_action() {
    let abi = abi(json!({
        "structs": [{ "name": "s", "fields": [
            { "name": "ok", "type": "uint8" },
            { "name": "weird", "type": "uint256" }
        ]}],
        "actions": [{ "name": "act", "type": "s" }]
    }));

    match decode_action_data(&abi, "act", &[1, 2]) {
        Err(DecodeError::UnsupportedType { field, type_name }) => {
            assert_eq!(field, "weird");
            assert_eq!(type_name, "uint256");
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_trailing_bytes_rejected() {
    let abi = abi(json!({
        "structs": [{ "name": "s", "fields": [{ "name": "a", "type": "uint8" }] }],
        "actions": [{ "name": "act", "type": "s" }]
    }));

    assert!(matches!(decode_action_data(&abi, "act", &[1, 2]), Err(DecodeError::InvalidData(_))));
}

#[test]
fn test_token_transfer() {
    let abi = abi(json!({
        "version": "eosio::abi/1.1",
        "types": [{ "new_type_name": "account_name", "type": "name" }],
        "structs": [{ "name": "transfer", "base": "", "fields": [
            { "name": "from", "type": "account_name" },
            { "name": "to", "type": "name" },
            { "name": "quantity", "type": "asset" },
            { "name": "memo", "type": "string" }
        ]}],
        "actions": [{ "name": "transfer", "type": "transfer", "ricardian_contract": "" }]
    }));
    let mut data = Vec::new();
    data.extend_from_slice(&name_bytes("alice"));
    data.extend_from_slice(&name_bytes("bob"));
    data.extend_from_slice(&12345i64.to_le_bytes());
    data.extend_from_slice(&[4, b'E', b'O', b'S', 0, 0, 0, 0]);
    data.extend_from_slice(&[2, b'h', b'i']);

    let fields = decode_action_data(&abi, "transfer", &data).unwrap();

    assert_eq!(
        Value::Object(fields),
        json!({ "from": "alice", "to": "bob", "quantity": "1.2345 EOS", "memo": "hi" })
    );
}

#[test]
fn test_nested_struct_arrays() {
    let abi = abi(json!({
        "structs": [
            { "name": "permission_level", "fields": [
                { "name": "actor", "type": "name" },
                { "name": "permission", "type": "name" }
            ]},
            { "name": "approve", "fields": [
                { "name": "levels", "type": "permission_level[]" },
                { "name": "note", "type": "string?" }
            ]}
        ],
        "actions": [{ "name": "approve", "type": "approve" }]
    }));
    let mut data = vec![1];
    data.extend_from_slice(&name_bytes("alice"));
    data.extend_from_slice(&name_bytes("active"));
    data.push(0);

    let fields = decode_action_data(&abi, "approve", &data).unwrap();

    assert_eq!(fields["levels"], json!([{ "actor": "alice", "permission": "active" }]));
    assert_eq!(fields["note"], Value::Null);
}

#[test]
fn test_variant() {
    let abi = abi(json!({
        "structs": [{ "name": "s", "fields": [{ "name": "v", "type": "choice" }] }],
        "variants": [{ "name": "choice", "types": ["uint8", "string"] }],
        "actions": [{ "name": "act", "type": "s" }]
    }));

    let fields = decode_action_data(&abi, "act", &[1, 2, b'o', b'k']).unwrap();
    assert_eq!(fields["v"], json!(["string", "ok"]));

    assert!(matches!(decode_action_data(&abi, "act", &[5, 0]), Err(DecodeError::InvalidData(_))));
}

#[test]
fn test_binary_extension_absent_and_present() {
    let abi = abi(json!({
        "structs": [{ "name": "s", "fields": [
            { "name": "a", "type": "uint8" },
            { "name": "b", "type": "uint16$" }
        ]}],
        "actions": [{ "name": "act", "type": "s" }]
    }));

    let absent = decode_action_data(&abi, "act", &[7]).unwrap();
    assert_eq!(keys(&absent), vec!["a"]);

    let present = decode_action_data(&abi, "act", &[7, 1, 1]).unwrap();
    assert_eq!(present["b"], json!(257));
}

#[test]
fn test_recursive_base_is_bounded() {
    let abi = abi(json!({
        "structs": [
            { "name": "a", "base": "b", "fields": [] },
            { "name": "b", "base": "a", "fields": [] }
        ],
        "actions": [{ "name": "act", "type": "a" }]
    }));

    assert!(matches!(decode_action_data(&abi, "act", &[]), Err(DecodeError::InvalidData(_))));
}

#[test]
fn test_recursive_alias_is_bounded() {
    let abi = abi(json!({
        "types": [{ "new_type_name": "loop", "type": "loop" }],
        "structs": [{ "name": "s", "fields": [{ "name": "f", "type": "loop" }] }],
        "actions": [{ "name": "act", "type": "s" }]
    }));

    assert!(matches!(decode_action_data(&abi, "act", &[0]), Err(DecodeError::InvalidData(_))));
}

#[test]
fn test_decode_struct_leaves_cursor_after_struct() {
    let abi = abi(json!({
        "structs": [{ "name": "s", "fields": [{ "name": "a", "type": "uint16" }] }]
    }));
    let data = [1, 0, 99];
    let mut cursor = ByteCursor::new(&data);

    let fields = ActionDecoder::new(&abi).decode_struct("s", &mut cursor).unwrap();

    assert_eq!(fields["a"], json!(1));
    assert_eq!(cursor.position(), 2);
}

#[test]
fn test_huge_array_of_empty_structs_rejected() {
    let abi = abi(json!({
        "structs": [
            { "name": "empty", "base": "", "fields": [] },
            { "name": "holder", "base": "", "fields": [{ "name": "items", "type": "empty[]" }] }
        ],
        "actions": [{ "name": "hold", "type": "holder" }]
    }));

    let result = decode_action_data(&abi, "hold", &[0xff, 0xff, 0xff, 0xff, 0x0f]);
    assert!(matches!(result, Err(DecodeError::InvalidData(_))));

    let result = decode_action_data(&abi, "hold", &[0x80, 0xda, 0xc4, 0x09]);
    assert!(matches!(result, Err(DecodeError::InvalidData(_))));

    let fields = decode_action_data(&abi, "hold", &[0x02]).unwrap();
    assert_eq!(fields["items"], json!([{}, {}]));
}

#[test]
fn test_trailing_extension_array_bounded() {
    let abi = abi(json!({
        "structs": [{ "name": "s", "base": "", "fields": [{ "name": "tail", "type": "uint8$[]" }] }],
        "actions": [{ "name": "act", "type": "s" }]
    }));

    let result = decode_action_data(&abi, "act", &[0xff, 0xff, 0xff, 0xff, 0x0f, 0x01]);
    assert!(matches!(result, Err(DecodeError::InvalidData(_))));
}
