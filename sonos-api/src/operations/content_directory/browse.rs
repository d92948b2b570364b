//! Browse operation for ContentDirectory service
//!
//! Sonos exposes the queue as object `Q:0` and the favorites list as `FV:2`.

use sonos_parser::DidlLite;
use xmltree::Element;
use crate::operation::{child_text, escape, required_u32};
use crate::{ApiError, Service, SonosOperation};

/// Object ID of the speaker's play queue
pub const QUEUE_OBJECT_ID: &str = "Q:0";

/// Object ID of the household's Sonos favorites
pub const FAVORITES_OBJECT_ID: &str = "FV:2";

pub struct BrowseOperation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseFlag {
    BrowseMetadata,
    BrowseDirectChildren,
}

impl BrowseFlag {
    fn as_str(&self) -> &'static str {
        match self {
            BrowseFlag::BrowseMetadata => "BrowseMetadata",
            BrowseFlag::BrowseDirectChildren => "BrowseDirectChildren",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BrowseRequest {
    pub object_id: String,
    pub browse_flag: BrowseFlag,
    pub filter: String,
    pub starting_index: u32,
    /// 0 asks for everything
    pub requested_count: u32,
    pub sort_criteria: String,
}

impl BrowseRequest {
    /// Direct children of `object_id`, all fields, at most `requested_count` entries
    pub fn children(object_id: &str, requested_count: u32) -> Self {
        Self {
            object_id: object_id.to_string(),
            browse_flag: BrowseFlag::BrowseDirectChildren,
            filter: "*".to_string(),
            starting_index: 0,
            requested_count,
            sort_criteria: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrowseResponse {
    /// DIDL-Lite document, already unescaped
    pub result: String,
    pub number_returned: u32,
    pub total_matches: u32,
}

impl BrowseResponse {
    /// Parse [`Self::result`] into DIDL-Lite items
    pub fn didl(&self) -> Result<DidlLite, ApiError> {
        Ok(DidlLite::from_xml(&self.result)?)
    }
}

impl SonosOperation for BrowseOperation {
    type Request = BrowseRequest;
    type Response = BrowseResponse;

    const SERVICE: Service = Service::ContentDirectory;
    const ACTION: &'static str = "Browse";

    fn build_payload(request: &Self::Request) -> String {
        format!(
            "<ObjectID>{}</ObjectID><BrowseFlag>{}</BrowseFlag><Filter>{}</Filter><StartingIndex>{}</StartingIndex><RequestedCount>{}</RequestedCount><SortCriteria>{}</SortCriteria>",
            escape(&request.object_id),
            request.browse_flag.as_str(),
            escape(&request.filter),
            request.starting_index,
            request.requested_count,
            escape(&request.sort_criteria)
        )
    }

    fn parse_response(xml: &Element) -> Result<Self::Response, ApiError> {
        Ok(BrowseResponse {
            result: child_text(xml, "Result"),
            number_returned: required_u32(xml, "NumberReturned")?,
            total_matches: required_u32(xml, "TotalMatches")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browse_payload() {
        let payload = BrowseOperation::build_payload(&BrowseRequest::children(QUEUE_OBJECT_ID, 1));
        assert_eq!(
            payload,
            "<ObjectID>Q:0</ObjectID><BrowseFlag>BrowseDirectChildren</BrowseFlag><Filter>*</Filter><StartingIndex>0</StartingIndex><RequestedCount>1</RequestedCount><SortCriteria></SortCriteria>"
        );
    }

    #[test]
    fn test_parse_browse_response() {
        let xml = Element::parse(
            r#"<BrowseResponse><Result>&lt;DIDL-Lite&gt;&lt;item id="FV:2/1" parentID="FV:2"&gt;&lt;dc:title&gt;Eclectic Rock Radio&lt;/dc:title&gt;&lt;res&gt;x-rincon-mp3radio://rock.example&lt;/res&gt;&lt;/item&gt;&lt;/DIDL-Lite&gt;</Result><NumberReturned>1</NumberReturned><TotalMatches>7</TotalMatches><UpdateID>3</UpdateID></BrowseResponse>"#.as_bytes(),
        )
        .unwrap();

        let parsed = BrowseOperation::parse_response(&xml).unwrap();
        assert_eq!(parsed.number_returned, 1);
        assert_eq!(parsed.total_matches, 7);

        let didl = parsed.didl().unwrap();
        assert_eq!(didl.items[0].title.as_deref(), Some("Eclectic Rock Radio"));
        assert_eq!(didl.items[0].uri(), Some("x-rincon-mp3radio://rock.example"));
    }

    #[test]
    fn test_missing_total_matches_is_error() {
        let xml = Element::parse(
            "<BrowseResponse><Result></Result><NumberReturned>0</NumberReturned></BrowseResponse>".as_bytes(),
        )
        .unwrap();
        assert!(BrowseOperation::parse_response(&xml).is_err());
    }
}
