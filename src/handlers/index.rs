//! Landing page with a minimal search form.

use actix_web::{Error, HttpResponse, Result};
use paperclip::actix::api_v2_operation;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Weather Lookup</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 0; background: #f5f5f5; color: #333; }
        .container { max-width: 720px; margin: 40px auto; padding: 20px; background: #fff;
                     box-shadow: 0 2px 8px rgba(0,0,0,0.1); border-radius: 8px; }
        form { display: flex; gap: 8px; }
        input[type=text] { flex: 1; padding: 8px; }
        table { width: 100%; border-collapse: collapse; margin-top: 16px; }
        td, th { padding: 6px; border-bottom: 1px solid #eee; text-align: left; }
        .error { color: #b00020; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Weather Lookup</h1>
        <form id="search">
            <input type="text" id="query" placeholder="City, landmark, ZIP, or lat,lon">
            <select id="units">
                <option value="metric">&deg;C</option>
                <option value="imperial">&deg;F</option>
            </select>
            <button type="submit">Search</button>
            <button type="button" id="locate">Use my location</button>
        </form>
        <div id="result"></div>
    </div>
    <script>
        const result = document.getElementById('result');

        function escapeHtml(text) {
            const div = document.createElement('div');
            div.textContent = text;
            return div.innerHTML;
        }

        function render(data) {
            const c = data.current;
            const rows = data.forecast.map(d =>
                `<tr><td>${d.date}</td><td>${d.temp_min} / ${d.temp_max}</td><td>${escapeHtml(d.description)}</td></tr>`
            ).join('');
            result.innerHTML = `
                <h2>${escapeHtml(data.location_name)}</h2>
                <p>${c.temp}&deg; (feels like ${c.feels_like}&deg;), ${escapeHtml(c.description)},
                   humidity ${c.humidity}%, pressure ${c.pressure} hPa, wind ${c.wind_speed}</p>
                <table><tr><th>Date</th><th>Min / Max</th><th>Conditions</th></tr>${rows}</table>`;
        }

        function lookup(params) {
            params.set('units', document.getElementById('units').value);
            result.textContent = 'Loading...';
            fetch('/api/weather?' + params.toString())
                .then(response => response.json())
                .then(data => {
                    if (data.error) {
                        result.innerHTML = `<p class="error">${escapeHtml(data.error)}</p>`;
                    } else {
                        render(data);
                    }
                })
                .catch(error => {
                    result.innerHTML = `<p class="error">Request failed: ${escapeHtml(String(error))}</p>`;
                });
        }

        document.getElementById('search').addEventListener('submit', event => {
            event.preventDefault();
            lookup(new URLSearchParams({ query: document.getElementById('query').value }));
        });

        document.getElementById('locate').addEventListener('click', () => {
            navigator.geolocation.getCurrentPosition(
                pos => lookup(new URLSearchParams({ lat: pos.coords.latitude, lon: pos.coords.longitude })),
                err => { result.innerHTML = `<p class="error">${escapeHtml(err.message)}</p>`; }
            );
        });
    </script>
</body>
</html>"#;

#[api_v2_operation(
    summary = "Search Page",
    description = "Returns an HTML page with a location search form backed by /api/weather.",
    tags("Pages"),
    responses(
        (status = 200, description = "Successful response")
    )
)]
pub async fn index() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML))
}
