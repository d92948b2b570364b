//! DIDL-Lite browse results

use serde::{Deserialize, Serialize};
use crate::error::{ParseError, ParseResult};
use crate::common::xml_decode;

/// DIDL-Lite document as returned by ContentDirectory `Browse`.
///
/// ```xml
/// <DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/" ...>
///   <item id="FV:2/3" parentID="FV:2" restricted="false">
///     <dc:title>Eclectic Rock Radio</dc:title>
///     <res protocolInfo="x-sonosapi-stream:*:*:*">x-sonosapi-stream:s123?sid=254</res>
///     <r:resMD>&lt;DIDL-Lite ...&gt;</r:resMD>
///   </item>
/// </DIDL-Lite>
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename = "DIDL-Lite")]
pub struct DidlLite {
    /// Items in document order; an empty browse yields none
    #[serde(rename = "item", default)]
    pub items: Vec<DidlItem>,
}

impl DidlLite {
    /// Parse DIDL-Lite XML content. Blank input is an empty document.
    pub fn from_xml(xml: &str) -> ParseResult<Self> {
        if xml.trim().is_empty() {
            return Ok(Self::default());
        }
        xml_decode::parse(xml)
            .map_err(|e| ParseError::XmlDeserializationFailed(format!("DIDL-Lite: {}", e)))
    }
}

/// One `item` element.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DidlItem {
    #[serde(rename = "@id", default)]
    pub id: String,

    #[serde(rename = "@parentID", default)]
    pub parent_id: String,

    #[serde(rename = "title", default)]
    pub title: Option<String>,

    #[serde(rename = "class", default)]
    pub class: Option<String>,

    /// Resource element with the playable URI
    #[serde(rename = "res", default)]
    pub res: Option<DidlResource>,

    /// Metadata Sonos wants echoed back when the item's URI is loaded
    /// (favorites carry it; queue items do not)
    #[serde(rename = "resMD", default)]
    pub res_md: Option<String>,
}

impl DidlItem {
    /// The item's playable URI, if it has a non-empty one
    pub fn uri(&self) -> Option<&str> {
        self.res
            .as_ref()
            .and_then(|r| r.uri.as_deref())
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
    }
}

/// `res` element: protocol info attribute plus the URI as text.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct DidlResource {
    #[serde(rename = "@protocolInfo", default)]
    pub protocol_info: Option<String>,

    #[serde(rename = "@duration", default)]
    pub duration: Option<String>,

    #[serde(rename = "$value", default)]
    pub uri: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAVORITES: &str = r#"<DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/" xmlns:r="urn:schemas-rinconnetworks-com:metadata-1-0/" xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/"><item id="FV:2/3" parentID="FV:2" restricted="false"><dc:title>Eclectic Rock Radio</dc:title><upnp:class>object.itemobject.item.sonos-favorite</upnp:class><r:ordinal>0</r:ordinal><res protocolInfo="x-sonosapi-stream:*:*:*">x-sonosapi-stream:s1234?sid=254&amp;flags=8224&amp;sn=0</res><r:type>instantPlay</r:type><r:description>TuneIn</r:description><r:resMD>&lt;DIDL-Lite&gt;&lt;item id=&quot;F00092020s1234&quot;&gt;&lt;/item&gt;&lt;/DIDL-Lite&gt;</r:resMD></item><item id="FV:2/4" parentID="FV:2" restricted="false"><dc:title>Morning Jazz</dc:title><upnp:class>object.itemobject.item.sonos-favorite</upnp:class><res protocolInfo="x-rincon-mp3radio:*:*:*">x-rincon-mp3radio://jazz.example/stream</res></item></DIDL-Lite>"#;

    #[test]
    fn test_parse_favorites() {
        let didl = DidlLite::from_xml(FAVORITES).unwrap();
        assert_eq!(didl.items.len(), 2);

        let first = &didl.items[0];
        assert_eq!(first.id, "FV:2/3");
        assert_eq!(first.title.as_deref(), Some("Eclectic Rock Radio"));
        assert_eq!(
            first.uri(),
            Some("x-sonosapi-stream:s1234?sid=254&flags=8224&sn=0")
        );
        assert!(first.res_md.as_deref().unwrap().starts_with("<DIDL-Lite>"));

        let second = &didl.items[1];
        assert_eq!(second.title.as_deref(), Some("Morning Jazz"));
        assert_eq!(second.res_md, None);
    }

    #[test]
    fn test_parse_empty_browse() {
        assert!(DidlLite::from_xml("").unwrap().items.is_empty());

        let empty = r#"<DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/"></DIDL-Lite>"#;
        assert!(DidlLite::from_xml(empty).unwrap().items.is_empty());
    }

    #[test]
    fn test_item_without_res_has_no_uri() {
        let xml = r#"<DIDL-Lite><item id="1" parentID="0"><dc:title>Nothing</dc:title><res></res></item></DIDL-Lite>"#;
        let didl = DidlLite::from_xml(xml).unwrap();
        assert_eq!(didl.items[0].uri(), None);
    }
}
