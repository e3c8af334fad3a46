use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct MapArgs {
    /// Network snapshot (JSON with `nodes`, `links` and `kiosks`)
    #[arg(short, long)]
    pub network: PathBuf,

    /// Event script (JSON array of events); reads stdin when absent
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Map view configuration file
    #[arg(short, long)]
    pub config_file: Option<PathBuf>,

    /// Route the view opens on
    #[arg(short, long, default_value = "/")]
    pub route: String,

    /// Human readable log output
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let args = MapArgs::try_parse_from(["mesh_map", "--network", "net.json"]).unwrap();
        assert_eq!(args.network, PathBuf::from("net.json"));
        assert_eq!(args.route, "/");
        assert!(args.script.is_none());
        assert!(!args.pretty);
    }

    #[test]
    fn network_is_required() {
        assert!(MapArgs::try_parse_from(["mesh_map"]).is_err());
    }
}
