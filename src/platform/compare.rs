//! Browser URLs for opening a change request by hand

use crate::error::{Error, Result};
use crate::types::{ChangeRequestDraft, Platform, PlatformConfig};
use url::Url;

/// URL of the "new pull/merge request" page prefilled from `draft`
pub fn manual_request_url(config: &PlatformConfig, draft: &ChangeRequestDraft) -> Result<String> {
    let project = format!("https://{}/{}/{}", config.web_host(), config.owner, config.repo);

    let url = match config.platform {
        Platform::GitHub => {
            let mut url = parse(&format!(
                "{project}/compare/{}...{}",
                draft.base_branch, draft.source_branch
            ))?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("expand", "1");
                query.append_pair("title", &draft.title);
                if let Some(body) = &draft.description {
                    query.append_pair("body", body);
                }
            }
            url
        }
        Platform::GitLab => {
            let mut url = parse(&format!("{project}/-/merge_requests/new"))?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("merge_request[source_branch]", &draft.source_branch);
                query.append_pair("merge_request[target_branch]", &draft.base_branch);
                query.append_pair("merge_request[title]", &draft.title);
                if let Some(body) = &draft.description {
                    query.append_pair("merge_request[description]", body);
                }
            }
            url
        }
    };

    Ok(url.to_string())
}

fn parse(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| Error::Parse(format!("invalid request URL {raw}: {e}")))
}
