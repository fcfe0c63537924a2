//! Record builder for the members-directory XML API.
//!
//! Walks a `<Members>` document and produces one contact record per
//! `<Member>` element. Of the address types the API returns (Website,
//! Constituency, Parliamentary, Twitter, ...) only the social/contact
//! ones are kept; postal office addresses are discarded.

use anyhow::{Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::BTreeMap;

/// Address types retained by the builder, lower-cased
pub const SOCIAL_ADDRESS_TYPES: &[&str] = &["twitter", "website"];

/// Contact details for one member, keyed by the directory's Member_Id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberContact {
    /// The directory's `Member_Id` attribute (the OfficialId), as received
    pub official_id: String,
    pub name: String,
    pub constituency: String,
    /// lower-cased address type -> Address1 value, whitelisted types only.
    /// Empty when the member has no matching addresses, never absent.
    pub addresses: BTreeMap<String, String>,
}

/// Which tracked element's text is currently being read
enum Field {
    DisplayAs,
    MemberFrom,
    AddressType,
    Address1,
}

/// Parse a `<Members>` document into contact records.
///
/// The fetch contract is per-constituency so the document usually holds a
/// single `<Member>`, but every element present is returned.
pub fn build_member_contacts(xml: &str) -> Result<Vec<MemberContact>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut contacts = Vec::new();
    let mut member: Option<MemberContact> = None;
    let mut in_addresses = false;
    let mut field: Option<Field> = None;
    let mut addr_type = String::new();
    let mut addr_value = String::new();

    loop {
        match reader.read_event().context("Malformed members XML")? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"Member" => {
                    let mut contact = MemberContact::default();
                    if let Some(attr) = e.try_get_attribute("Member_Id")? {
                        contact.official_id = attr.unescape_value()?.into_owned();
                    }
                    member = Some(contact);
                }
                b"Addresses" => in_addresses = true,
                b"Address" if in_addresses => {
                    addr_type.clear();
                    addr_value.clear();
                }
                b"DisplayAs" if !in_addresses => field = Some(Field::DisplayAs),
                b"MemberFrom" if !in_addresses => field = Some(Field::MemberFrom),
                b"Type" if in_addresses => field = Some(Field::AddressType),
                b"Address1" if in_addresses => field = Some(Field::Address1),
                _ => {}
            },
            Event::Text(ref e) => {
                let text = e.unescape().context("Bad text node in members XML")?;
                if let (Some(contact), Some(f)) = (member.as_mut(), field.as_ref()) {
                    match f {
                        Field::DisplayAs => contact.name = text.into_owned(),
                        Field::MemberFrom => contact.constituency = text.into_owned(),
                        Field::AddressType => addr_type = text.into_owned(),
                        Field::Address1 => addr_value = text.into_owned(),
                    }
                }
            }
            Event::End(ref e) => {
                match e.local_name().as_ref() {
                    b"Member" => {
                        if let Some(contact) = member.take() {
                            contacts.push(contact);
                        }
                    }
                    b"Addresses" => in_addresses = false,
                    b"Address" if in_addresses => {
                        let key = addr_type.to_lowercase();
                        if SOCIAL_ADDRESS_TYPES.contains(&key.as_str())
                            && !addr_value.is_empty()
                        {
                            if let Some(contact) = member.as_mut() {
                                contact.addresses.insert(key, addr_value.clone());
                            }
                        }
                    }
                    _ => {}
                }
                field = None;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(contacts)
}
