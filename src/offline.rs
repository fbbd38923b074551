//! Web app manifest and the cache-first service worker.

pub const CACHE_NAME: &str = "calorie-log-cache-v1";

/// Precached on install. Entry data is never cached.
pub const CACHED_ASSETS: [&str; 2] = ["/", "/manifest.json"];

pub const MANIFEST_JSON: &str = r##"{
  "name": "Calorie Log",
  "short_name": "Calories",
  "start_url": "/",
  "display": "standalone",
  "background_color": "#f8f3e6",
  "theme_color": "#3b82f6"
}
"##;

pub fn service_worker_js() -> String {
    let assets = CACHED_ASSETS
        .iter()
        .map(|asset| format!("'{asset}'"))
        .collect::<Vec<_>>()
        .join(", ");

    SERVICE_WORKER_JS
        .replace("{{CACHE_NAME}}", CACHE_NAME)
        .replace("{{ASSETS}}", &assets)
}

const SERVICE_WORKER_JS: &str = r#"const CACHE_NAME = '{{CACHE_NAME}}';
const FILES_TO_CACHE = [{{ASSETS}}];

self.addEventListener('install', (event) => {
  event.waitUntil(
    caches.open(CACHE_NAME).then((cache) => cache.addAll(FILES_TO_CACHE))
  );
});

self.addEventListener('fetch', (event) => {
  event.respondWith(
    caches.match(event.request).then((response) => response || fetch(event.request))
  );
});
"#;
