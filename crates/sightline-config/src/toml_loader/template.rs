//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Sightline Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

# Surfaces are created in this order. Interactive surfaces keep the
# process alive; when the last one closes, Sightline exits.
[[surfaces]]
name = "main"
width = 1000             # 1-16384
height = 600             # 1-16384
visible = true
route = "home"
interactive = true

[[surfaces]]
name = "kinect"
width = 800
height = 600
visible = false          # revealed by the `show-kinect` topic
route = "kinect"
interactive = false

[routes]
# page = "path under the content root / dev server"
home = "home"
kinect = "kinect"

[content]
# Bundled pages, used when SIGHTLINE_ENV=production.
# root = "app"           # relative to the executable
# scheme = "app"

[dev_server]
# Live mode: pages load from http://<host>:<port>/<route>.
# The port is the first command-line argument.
# host = "localhost"
# devtools = true

[bridge]
# reveal_surface = "kinect"

[logging]
# level = "info"         # trace, debug, info, warn, error
"##
    .to_string()
}
