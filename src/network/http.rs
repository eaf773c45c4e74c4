//! Image loader backed by reqwest on a tokio runtime

use super::images::{NaturalSize, decode_dimensions};
use super::loader::{CompletedLoad, ImageLoader};
use crate::utils::{RespswapError, Result};
use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{self, Receiver, Sender};
use tokio::runtime::Runtime;

/// Fetches images over HTTP(S) and reports their natural sizes.
///
/// Fetches run on a background runtime; completions are handed back over a
/// channel so that listeners still run on the caller's thread.
pub struct HttpImageLoader {
    runtime: Runtime,
    client: reqwest::Client,
    complete: HashMap<String, NaturalSize>,
    in_flight: HashSet<String>,
    /// Completions for requests that hit the cache
    ready: Vec<CompletedLoad>,
    sender: Sender<CompletedLoad>,
    receiver: Receiver<CompletedLoad>,
}

impl HttpImageLoader {
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("respswap/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let (sender, receiver) = mpsc::channel();
        Ok(Self {
            runtime,
            client,
            complete: HashMap::new(),
            in_flight: HashSet::new(),
            ready: Vec::new(),
            sender,
            receiver,
        })
    }

    fn start(&mut self, url: &str) {
        if !self.in_flight.insert(url.to_string()) {
            return;
        }
        log::debug!("fetching {}", url);
        let client = self.client.clone();
        let sender = self.sender.clone();
        let url = url.to_string();
        self.runtime.spawn(async move {
            let result = fetch_dimensions(&client, &url).await;
            // The receiver only goes away with the loader itself.
            let _ = sender.send(CompletedLoad { url, result });
        });
    }

    fn record(&mut self, load: &CompletedLoad) {
        self.in_flight.remove(&load.url);
        if let Ok(size) = &load.result {
            self.complete.insert(load.url.clone(), *size);
        }
    }
}

async fn fetch_dimensions(client: &reqwest::Client, url: &str) -> Result<NaturalSize> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(RespswapError::Http(status.as_u16(), url.to_string()));
    }
    let bytes = response.bytes().await?;
    decode_dimensions(&bytes)
}

impl ImageLoader for HttpImageLoader {
    fn probe(&mut self, url: &str) -> Option<NaturalSize> {
        if let Some(size) = self.complete.get(url) {
            return Some(*size);
        }
        self.start(url);
        None
    }

    fn request(&mut self, url: &str) {
        match self.complete.get(url) {
            Some(size) => self.ready.push(CompletedLoad {
                url: url.to_string(),
                result: Ok(*size),
            }),
            None => self.start(url),
        }
    }

    fn poll(&mut self) -> Vec<CompletedLoad> {
        let mut done = std::mem::take(&mut self.ready);
        while let Ok(load) = self.receiver.try_recv() {
            self.record(&load);
            done.push(load);
        }
        done
    }

    fn wait(&mut self) -> Vec<CompletedLoad> {
        let mut done = self.poll();
        if done.is_empty() && !self.in_flight.is_empty() {
            if let Ok(load) = self.receiver.recv() {
                self.record(&load);
                done.push(load);
            }
            done.extend(self.poll());
        }
        done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::{Cursor, Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        RgbImage::new(width, height)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn read_request_path(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut tmp = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut tmp) {
                Ok(0) | Err(_) => break,
                Ok(n) => buf.extend_from_slice(&tmp[..n]),
            }
        }
        String::from_utf8_lossy(&buf)
            .split_whitespace()
            .nth(1)
            .unwrap_or("/")
            .to_string()
    }

    /// Serves `/a.png` as a 7x3 PNG and 404s everything else. Returns the
    /// server's base URL.
    fn spawn_image_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let png = png_bytes(7, 3);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let path = read_request_path(&mut stream);
                let (status, body): (&str, &[u8]) = if path == "/a.png" {
                    ("200 OK", png.as_slice())
                } else {
                    ("404 Not Found", &b"missing"[..])
                };
                let head = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    body.len()
                );
                let _ = stream.write_all(head.as_bytes());
                let _ = stream.write_all(body);
            }
        });
        base
    }

    #[test]
    fn test_fetches_dimensions_over_http() {
        let base = spawn_image_server();
        let url = format!("{}/a.png", base);
        let mut loader = HttpImageLoader::new().unwrap();

        assert_eq!(loader.probe(&url), None);
        assert_eq!(loader.in_flight.len(), 1);

        let done = loader.wait();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].url, url);
        assert_eq!(done[0].result.as_ref().unwrap(), &NaturalSize::new(7, 3));
        assert!(loader.in_flight.is_empty());

        // Cached now, no second fetch
        assert_eq!(loader.probe(&url), Some(NaturalSize::new(7, 3)));
        assert!(loader.in_flight.is_empty());
        assert!(loader.wait().is_empty());
    }

    #[test]
    fn test_http_error_status_is_reported() {
        let base = spawn_image_server();
        let url = format!("{}/missing.png", base);
        let mut loader = HttpImageLoader::new().unwrap();

        loader.request(&url);
        let done = loader.wait();
        assert_eq!(done.len(), 1);
        match &done[0].result {
            Err(RespswapError::Http(404, failed)) => assert_eq!(failed, &url),
            other => panic!("expected a 404, got {:?}", other),
        }

        // Failures are not cached; the loader is idle again.
        assert!(loader.complete.is_empty());
        assert!(loader.wait().is_empty());
    }

    #[test]
    fn test_idle_loader_does_not_block() {
        let mut loader = HttpImageLoader::new().unwrap();
        assert!(loader.poll().is_empty());
        assert!(loader.wait().is_empty());
    }

    #[test]
    fn test_cached_request_completes_without_fetch() {
        let mut loader = HttpImageLoader::new().unwrap();
        loader
            .complete
            .insert("https://img.test/a.jpg".to_string(), NaturalSize::new(4, 3));
        loader.request("https://img.test/a.jpg");
        assert!(loader.in_flight.is_empty());

        let done = loader.poll();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].result.as_ref().unwrap(), &NaturalSize::new(4, 3));
    }
}
