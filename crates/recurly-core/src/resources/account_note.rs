use serde::{Deserialize, Serialize};

use crate::pager::Pager;
use crate::resources::account::account_path;
use crate::validation::require;
use crate::xml::{XmlElement, XmlError, XmlResource};
use crate::{RecurlyClient, RecurlyError, UtcDateTime};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountNote {
    pub account_code: Option<String>,
    pub message: String,
    pub created_at: Option<UtcDateTime>,
}

impl XmlResource for AccountNote {
    const ELEMENT_NAME: &'static str = "note";

    fn from_element(element: &XmlElement) -> Result<Self, XmlError> {
        Ok(Self {
            account_code: element.child_href_id("account"),
            message: element.child_string("message").unwrap_or_default(),
            created_at: element.child_datetime("created_at")?,
        })
    }
}

impl RecurlyClient {
    /// Notes on an account, newest first.
    pub fn list_account_notes(
        &self,
        account_code: &str,
        page_size: u32,
    ) -> Result<Pager<AccountNote>, RecurlyError> {
        require("account_code", account_code)?;
        Ok(Pager::new(
            self.clone(),
            &format!("{}/notes", account_path(account_code)),
            Vec::new(),
            page_size,
        )?)
    }
}
