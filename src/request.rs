use std::sync::Arc;

use reqwest::Client;
use tokio::task::spawn_blocking;
use url::Url;

use crate::config::Config;
use crate::parse::{PageMiss, PageParser};
use crate::{info_time, warn_time, Result, NOT_FOUND, SEARCH_PATH};

/// Outcome of one SKU lookup. Every failure collapses into `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductUrl {
    Found(String),
    NotFound,
}

impl ProductUrl {
    pub fn as_str(&self) -> &str {
        match self {
            ProductUrl::Found(url) => url,
            ProductUrl::NotFound => NOT_FOUND,
        }
    }
}

/// One report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub sku: String,
    pub url: ProductUrl,
}

impl Resolution {
    fn not_found(sku: &str) -> Self {
        Self {
            sku: sku.to_string(),
            url: ProductUrl::NotFound,
        }
    }
}

/// Builds the HTTP client shared by every lookup of a run.
/// `Client` pools connections internally, so one instance keeps them alive between SKUs.
pub fn build_client(cfg: &Config) -> Result<Client> {
    let client = Client::builder()
        .user_agent(cfg.user_agent.as_str())
        .timeout(cfg.request_timeout())
        .build()?;
    Ok(client)
}

/// Looks SKUs up on the site's catalog search and turns the first hit into an absolute URL.
pub struct Resolver {
    client: Client,
    site: Url,
    search_base: Url,
    parser: Arc<dyn PageParser>,
}

impl Resolver {
    pub fn new(client: Client, site: &str, parser: Arc<dyn PageParser>) -> Result<Self> {
        let site = Url::parse(site)?;
        let search_base = site.join(SEARCH_PATH)?;
        Ok(Self {
            client,
            site,
            search_base,
            parser,
        })
    }

    /// `<site>/catalogsearch/result/?q=<sku>` with the SKU percent-encoded.
    pub fn search_url(&self, sku: &str) -> Url {
        let mut url = self.search_base.clone();
        url.query_pairs_mut().append_pair("q", sku);
        url
    }

    /// Never fails: transport errors, bad statuses and unexpected markup all
    /// end up as `ProductUrl::NotFound`.
    pub async fn resolve(&self, sku: &str) -> Resolution {
        let search_url = self.search_url(sku);
        info_time!("→ Fetching {search_url}");

        let html = match self.fetch_html(search_url).await {
            Ok(html) => html,
            Err(e) => {
                warn_time!("← {sku}: request failed ({e})");
                return Resolution::not_found(sku);
            }
        };

        let href = match self.extract_href(html).await {
            Ok(Ok(href)) => href,
            Ok(Err(miss)) => {
                info_time!("← {sku}: not found ({miss})");
                return Resolution::not_found(sku);
            }
            Err(e) => {
                warn_time!("← {sku}: couldn't parse the search page ({e})");
                return Resolution::not_found(sku);
            }
        };

        match absolutize(&self.site, &href) {
            Some(url) => {
                info_time!("← {sku}: found {url}");
                Resolution {
                    sku: sku.to_string(),
                    url: ProductUrl::Found(url),
                }
            }
            None => {
                warn_time!("← {sku}: unusable product link {href:?}");
                Resolution::not_found(sku)
            }
        }
    }

    /// Requests a page and returns a `Result<String>` containing the HTML.
    /// Non-2xx statuses are errors.
    async fn fetch_html(&self, url: Url) -> Result<String> {
        let res = self.client.get(url).send().await?.error_for_status()?;
        let html = res.text().await?;
        Ok(html)
    }

    async fn extract_href(&self, html: String) -> Result<std::result::Result<String, PageMiss>> {
        let parser = Arc::clone(&self.parser);
        let href = spawn_blocking(move || parser.product_href(&html)).await?;
        Ok(href)
    }
}

/// Hrefs starting with `http` pass through, anything else is resolved against the site origin.
fn absolutize(site: &Url, href: &str) -> Option<String> {
    if href.starts_with("http") {
        return Some(href.to_string());
    }
    site.join(href).ok().map(String::from)
}
