use crate::server::api;
use crate::server::api::ApiError;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

fn ok_json(body: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "application/json",
        body,
    }
}

fn api_error_response(err: ApiError) -> HttpResponse {
    match err {
        ApiError::Parse(parse) => {
            error_response(400, "Bad Request", &format!("Invalid request body: {parse}"))
        }
        ApiError::Validation(msg) => error_response(400, "Bad Request", &msg),
        ApiError::NotFound => error_response(404, "Not Found", "Game not found"),
        ApiError::AlreadyRunning => error_response(
            409,
            "Conflict",
            "A simulation is already running for this game",
        ),
    }
}

pub fn route_request(method: &str, path: &str, body: &str) -> HttpResponse {
    match (method, path) {
        ("GET", "/") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: index_html(),
        },
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/events") => match api::events_payload() {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/games") => match api::games_payload() {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("POST", "/api/games") => match api::create_game_payload(body) {
            Ok(payload) => ok_json(payload),
            Err(err) => api_error_response(err),
        },
        ("POST", "/api/odds") => match api::odds_payload(body) {
            Ok(payload) => ok_json(payload),
            Err(err) => api_error_response(err),
        },
        (method, path) if path.starts_with("/api/games/") => {
            route_game_request(method, path, body)
        }
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn route_game_request(method: &str, path: &str, body: &str) -> HttpResponse {
    let rest = path.trim_start_matches("/api/games/");
    let mut segments = rest.split('/');
    let id = segments.next().unwrap_or("");
    let action = segments.next();

    let result = match (method, action) {
        ("GET", None) => api::game_get_payload(id),
        ("DELETE", None) => api::game_delete_payload(id),
        ("POST", Some("step")) => api::game_step_payload(id, body),
        ("POST", Some("run")) => api::game_run_payload(id, body),
        _ => return error_response(404, "Not Found", "Route not found"),
    };
    match result {
        Ok(payload) => ok_json(payload),
        Err(err) => api_error_response(err),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

fn index_html() -> String {
    r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Thunderdome Console</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 860px; margin: 24px auto; padding: 0 12px; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0; }
    label { display:block; margin: 8px 0 4px; font-weight: 600; }
    input { width: 100%; padding: 8px; box-sizing: border-box; }
    button { margin-top: 12px; padding: 8px 14px; }
    pre { background: #111; color: #aef2ae; padding: 12px; overflow: auto; border-radius: 6px; min-height: 160px; }
  </style>
</head>
<body>
  <h1>Thunderdome Local API</h1>
  <p>Create a game, step it event by event, or run it to the winner.</p>

  <div class="card">
    <strong>New game</strong>
    <label for="players">Players</label>
    <input id="players" type="number" min="2" max="512" value="20" />
    <label for="seed">Seed</label>
    <input id="seed" type="number" min="0" value="0" />
    <div><button id="create-btn">POST /api/games</button></div>
  </div>

  <div class="card">
    <strong>Step / run</strong>
    <label for="game-id">Game id</label>
    <input id="game-id" placeholder="uuid from the create response" />
    <div>
      <button id="step-btn">POST /api/games/&lt;id&gt;/step</button>
      <button id="run-btn">POST /api/games/&lt;id&gt;/run</button>
    </div>
  </div>

  <pre id="output">Ready.</pre>

  <script>
    const output = document.getElementById('output');
    async function request(path, options) {
      output.textContent = 'Loading…';
      const response = await fetch(path, options);
      output.textContent = 'HTTP ' + response.status + '\n' + await response.text();
    }
    document.getElementById('create-btn').addEventListener('click', () => {
      const payload = {
        players: Number(document.getElementById('players').value) || 20,
        seed: Number(document.getElementById('seed').value) || 0,
      };
      request('/api/games', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(payload),
      });
    });
    const gameId = () => document.getElementById('game-id').value.trim();
    document.getElementById('step-btn').addEventListener('click', () => {
      request('/api/games/' + gameId() + '/step', { method: 'POST', body: '{}' });
    });
    document.getElementById('run-btn').addEventListener('click', () => {
      request('/api/games/' + gameId() + '/run', { method: 'POST', body: '{}' });
    });
  </script>
</body>
</html>
"#
    .to_string()
}
