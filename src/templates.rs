//! # Configuration Templates
//!
//! The five files of the generated configuration tree are fixed templates
//! with named placeholders in format-string style: `{hostname}`,
//! `{config_directory}`, `{user}` and `{grafana_image}`. `{{` and `}}` stand
//! for literal braces.
//!
//! Rendering is pure. Variables a template does not mention are ignored. A
//! placeholder with no matching variable (including positional `{0}` or
//! names with spaces) and an unpaired `{` or `}` fail the render instead of
//! being left in the output.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{Error, Result};

/// A named template body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub body: &'static str,
}

/// OCS site configuration for the host and its containerised agents.
pub const DEFAULT_SITE: Template = Template {
    name: "default-site",
    body: r#"# Site configuration for a fake observatory.
hub:
  wamp_server: ws://localhost:8001/ws
  wamp_http: http://localhost:8001/call
  wamp_realm: test_realm
  address_root: observatory

hosts:
  {hostname}-docker:
    # Directory for logs.
    log-dir: '/home/{user}/log/ocs/'

    # List of additional paths to Agent plugin modules.
    agent-paths:
      - '/home/{user}/git/ocs/agents/'
      - '/home/{user}/git/socs/agents/'

    # Agents running directly on the host machine
    agent-instances:
      - agent-class: 'HostManager'
        instance-id: 'hm-1'

    # Address of crossbar within Docker (based on service name)
    wamp_server: 'ws://crossbar:8001/ws'
    wamp_http: 'http://crossbar:8001/call'

    # Agents running within Docker containers
    agent-instances:
      - agent-class: 'InfluxDBAgent'
        instance-id: 'influxagent'
        arguments: ['--initial-state', 'record',
                    '--host', 'influxdb',
                    '--port', 8086,
                    '--protocol', 'line',
                    '--gzip', True,
                    '--database', 'ocs_feeds']
      - agent-class: 'FakeDataAgent'
        instance-id: 'fake-data1'
        arguments: ['--mode', 'acq',
                    '--num-channels', '16',
                    '--sample-rate', '4']
"#,
};

/// Top-level compose file running the OCS agents.
pub const COMPONENTS_COMPOSE: Template = Template {
    name: "components-compose",
    body: r#"networks:
    default:
        name: ocs-net
        external: true
services:
    # --------------------------------------------------------------------------
    # OCS Components
    # --------------------------------------------------------------------------
    # Fake Data Agent for example housekeeping data
    ocs-fake-data1:
        image: simonsobs/ocs:latest
        hostname: {hostname}-docker
        environment:
            - INSTANCE_ID=fake-data1
            - LOGLEVEL=info
        volumes:
            - {config_directory}:/config:ro

    # InfluxDB Publisher
    ocs-influx-publisher:
        image: simonsobs/ocs:latest
        hostname: {hostname}-docker
        environment:
            - INSTANCE_ID=influxagent
        volumes:
            - {config_directory}:/config:ro"#,
};

/// Grafana dashboard service.
pub const GRAFANA_COMPOSE: Template = Template {
    name: "grafana-compose",
    body: r#"networks:
    default:
        name: ocs-net
        external: true
volumes:
    grafana-storage:
services:
    grafana:
        image: {grafana_image}
        ports:
            - "127.0.0.1:3000:3000"
        volumes:
            - grafana-storage:/var/lib/grafana
        environment:
            - GF_DASHBOARDS_MIN_REFRESH_INTERVAL=100ms
"#,
};

/// InfluxDB time-series store.
pub const INFLUXDB_COMPOSE: Template = Template {
    name: "influxdb-compose",
    body: r#"networks:
    default:
        name: ocs-net
        external: true
volumes:
    influxdb-storage:
services:
    influxdb:
        image: "influxdb:1.7"
        container_name: "influxdb"
        restart: always
        ports:
            - "8086:8086"
        volumes:
            - influxdb-storage:/var/lib/influxdb
        environment:
            - INFLUXDB_HTTP_LOG_ENABLED=false
"#,
};

/// Crossbar WAMP router.
pub const CROSSBAR_COMPOSE: Template = Template {
    name: "crossbar-compose",
    body: r#"networks:
    default:
        name: ocs-net
        external: true
volumes:
    crossbar-storage:
services:
    crossbar:
        image: simonsobs/ocs-crossbar:latest
        volumes:
            - crossbar-storage:/data
        ports:
            - "127.0.0.1:8001:8001"
        environment:
            - PYTHONUNBUFFERED=1
"#,
};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{|\}\}|\{([^{}]*)\}|[{}]").expect("placeholder pattern is valid")
});

/// Values substituted into templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    values: HashMap<String, String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four site variables for a file written into `config_directory`.
    ///
    /// `user` is the hostname: the site layout puts logs and agent checkouts
    /// under `/home/<hostname>/`.
    pub fn for_site(hostname: &str, config_directory: &Path, grafana_image: &str) -> Self {
        Self::new()
            .with("hostname", hostname)
            .with("config_directory", config_directory.display().to_string())
            .with("user", hostname)
            .with("grafana_image", grafana_image)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Substitute `vars` into `template`.
pub fn render(template: &Template, vars: &TemplateVars) -> Result<String> {
    let body = template.body;
    let mut rendered = String::with_capacity(body.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(body) {
        let whole = caps.get(0).expect("capture 0 is the whole match");
        rendered.push_str(&body[last..whole.start()]);
        rendered.push_str(replacement(template, &caps, vars)?);
        last = whole.end();
    }
    rendered.push_str(&body[last..]);

    Ok(rendered)
}

fn replacement<'v>(
    template: &Template,
    caps: &Captures<'_>,
    vars: &'v TemplateVars,
) -> Result<&'v str> {
    if let Some(name) = caps.get(1) {
        return vars.get(name.as_str()).ok_or_else(|| Error::Template {
            message: format!("template '{}' references an unknown placeholder", template.name),
            variable: Some(name.as_str().to_string()),
        });
    }

    match &caps[0] {
        "{{" => Ok("{"),
        "}}" => Ok("}"),
        brace => Err(Error::Template {
            message: format!(
                "single '{}' encountered in template '{}'",
                brace, template.name
            ),
            variable: None,
        }),
    }
}
