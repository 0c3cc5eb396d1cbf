use pdf_stdsec::{EncryptionDictionary, Permissions, Revision, SecurityHandler, StandardSecurityHandler};

#[test]
fn dictionary_survives_json() {
    let mut dict = EncryptionDictionary::builder()
        .revision(Revision::R4)
        .permissions(Permissions::PRINTABLE | Permissions::COPYABLE)
        .encrypt_metadata(false)
        .build();
    let handler = StandardSecurityHandler::from_dictionary(vec![0x42u8; 16], &dict);
    let key = handler.generate_params(&mut dict, b"owner", b"user").unwrap();

    let json = serde_json::to_string(&dict).unwrap();
    let restored: EncryptionDictionary = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, dict);

    let (restored_key, permissions) = handler.authenticate(&restored, b"user").unwrap();
    assert_eq!(restored_key, Some(key));
    assert_eq!(serde_json::to_value(permissions).unwrap(), serde_json::json!(dict.permissions as u32 as u64));
}

#[test]
fn revision_and_permissions_serialize_plainly() {
    assert_eq!(serde_json::to_string(&Revision::R3).unwrap(), "\"R3\"");
    assert_eq!(serde_json::to_string(&Permissions::OWNER).unwrap(), "18446744073709551615");

    let permissions: Permissions = serde_json::from_str("4294963396").unwrap();
    assert_eq!(permissions, Permissions::from_p(-3900));
}
