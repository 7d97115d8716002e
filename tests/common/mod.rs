#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::Workbook;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A canned search response: HTTP status and body.
#[derive(Debug, Clone)]
pub enum Page {
    Html(u16, String),
    /// Never answers, for timeout tests.
    Hang,
}

pub fn results_page(href: &str) -> String {
    format!(
        r#"<html><body>
        <h1>Има намерени 1 продукта</h1>
        <div class="flex"><a href="/cart">cart</a></div>
        <div class="grid grid-cols-2 place-items-center">
            <a href="{href}"><img src="/img.png"></a>
        </div>
        </body></html>"#
    )
}

pub fn empty_results_page() -> String {
    "<html><body><h1>Няма резултати</h1></body></html>".to_string()
}

/// `User-Agent` values seen by the stub, in arrival order.
pub type SeenAgents = Arc<Mutex<Vec<String>>>;

/// Serves `pages` keyed by the raw `q` query value on a local port and returns
/// the origin (`http://127.0.0.1:<port>`). Unknown queries get a 404.
pub async fn serve(pages: HashMap<String, Page>) -> String {
    serve_recording(pages).await.0
}

/// Like `serve`, also returning the `User-Agent` header of every request.
pub async fn serve_recording(pages: HashMap<String, Page>) -> (String, SeenAgents) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let pages = Arc::new(pages);
    let agents = SeenAgents::default();

    tokio::spawn({
        let agents = Arc::clone(&agents);
        async move {
            while let Ok((stream, _)) = listener.accept().await {
                let pages = Arc::clone(&pages);
                let agents = Arc::clone(&agents);
                tokio::spawn(async move { answer(stream, &pages, &agents).await });
            }
        }
    });

    (format!("http://{addr}"), agents)
}

async fn answer(mut stream: TcpStream, pages: &HashMap<String, Page>, agents: &SeenAgents) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }

    let request = String::from_utf8_lossy(&buf);
    if let Some(agent) = request.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.eq_ignore_ascii_case("user-agent")
            .then(|| value.trim().to_string())
    }) {
        agents.lock().unwrap().push(agent);
    }
    let target = request.split_whitespace().nth(1).unwrap_or("/");
    let query = target
        .split_once("q=")
        .map(|(_, q)| q.split('&').next().unwrap_or(q))
        .unwrap_or("");

    let (status, body) = match pages.get(query) {
        Some(Page::Html(status, body)) => (*status, body.clone()),
        Some(Page::Hang) => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            return;
        }
        None => (404, "<html><body>404</body></html>".to_string()),
    };

    let response = format!(
        "HTTP/1.1 {status} STUB\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// Writes an input workbook with a header cell followed by `skus` in column A.
pub fn write_input(path: &Path, skus: &[&str]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "SKU").unwrap();
    for (idx, sku) in skus.iter().enumerate() {
        sheet.write_string(idx as u32 + 1, 0, *sku).unwrap();
    }
    workbook.save(path).unwrap();
}

/// All rows of the `Results` sheet as text.
pub fn read_report(path: &Path) -> Vec<(String, String)> {
    let mut workbook = open_workbook_auto(path).unwrap();
    let range = workbook.worksheet_range("Results").unwrap();
    range
        .rows()
        .map(|row| {
            let text = |cell: Option<&Data>| match cell {
                Some(Data::Empty) | None => String::new(),
                Some(other) => other.to_string(),
            };
            (text(row.first()), text(row.get(1)))
        })
        .collect()
}
