#[cfg(target_arch = "wasm32")]
fn main() {
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("section_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use bowl_engine::bowl::{Section, SuperRiser, TierConfig};
    use bowl_engine::geom::Plane;
    use std::fmt::Write as _;
    use std::fs;
    use std::path::{Path, PathBuf};

    const DECIMALS: usize = 4;

    const USAGE: &str = r#"section_cli (bowl-engine)

USAGE:
  section_cli list
  section_cli run <scenario> [options]

SCENARIOS:
  single_tier
  two_tiers
  super_riser
  stadium_default

OPTIONS (run):
  --csv <path>       Write profile points as CSV (tier,index,x,y,z) instead of printing
  --standing         Report standing eyes and C-values instead of seated ones
  --overwrite        Overwrite an existing CSV file
  -h, --help         Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => {
                for scenario in Scenario::ALL {
                    println!("{}", scenario.name());
                }
                Ok(())
            }
            "run" => cmd_run(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn cmd_run(args: &mut Args) -> Result<(), String> {
        let scenario_name = args.next().ok_or("missing scenario name")?;

        let mut csv_path: Option<PathBuf> = None;
        let mut standing = false;
        let mut overwrite = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--csv" => csv_path = Some(PathBuf::from(args.value("--csv")?)),
                "--standing" => standing = true,
                "--overwrite" => overwrite = true,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        let scenario = Scenario::from_str(&scenario_name)
            .ok_or_else(|| format!("unknown scenario `{scenario_name}` (try `section_cli list`)"))?;
        let section = scenario.build().map_err(|e| format!("{}: {e}", scenario.name()))?;

        if let Some(path) = csv_path.as_deref() {
            write_text_file(path, &points_csv(&section), overwrite)?;
            eprintln!("wrote {}", path.display());
        } else {
            print!("{}", summary(&section, standing));
        }
        Ok(())
    }

    #[derive(Debug, Clone, Copy)]
    enum Scenario {
        SingleTier,
        TwoTiers,
        SuperRiser,
        StadiumDefault,
    }

    impl Scenario {
        const ALL: &'static [Scenario] = &[
            Scenario::SingleTier,
            Scenario::TwoTiers,
            Scenario::SuperRiser,
            Scenario::StadiumDefault,
        ];

        fn name(self) -> &'static str {
            match self {
                Scenario::SingleTier => "single_tier",
                Scenario::TwoTiers => "two_tiers",
                Scenario::SuperRiser => "super_riser",
                Scenario::StadiumDefault => "stadium_default",
            }
        }

        fn from_str(name: &str) -> Option<Self> {
            Self::ALL.iter().copied().find(|s| s.name() == name)
        }

        fn build(self) -> Result<Section, bowl_engine::bowl::SectionError> {
            let plane = Plane::world_yz();
            match self {
                Scenario::SingleTier => {
                    let tier = TierConfig::default().with_rows(12, 0.8);
                    Section::new(vec![tier], plane)
                }
                Scenario::TwoTiers => {
                    let lower = TierConfig::default().with_rows(15, 0.8);
                    let mut upper = TierConfig::default().with_rows(12, 0.85).chained();
                    upper.fascia_height = 1.5;
                    Section::new(vec![lower, upper], plane)
                }
                Scenario::SuperRiser => {
                    let mut sr = SuperRiser::with_unit(1.0, 8);
                    sr.curb_width = 0.2;
                    sr.curb_height = 0.15;
                    sr.guardrail_width = 0.1;
                    let tier = TierConfig::default().with_rows(20, 0.8).with_super_riser(sr);
                    Section::new(vec![tier], plane)
                }
                Scenario::StadiumDefault => {
                    let lower = TierConfig::default();
                    let upper = TierConfig::default().chained();
                    Section::new(vec![lower, upper], plane)
                }
            }
        }
    }

    fn summary(section: &Section, standing: bool) -> String {
        let label = if standing { "standing" } else { "seated" };
        let c_values = section.c_values(standing);
        let eyes = section.spectator_points(standing);

        let mut out = String::new();
        for (t, tier) in section.tiers().iter().enumerate() {
            let _ = writeln!(out, "tier {t}: {} points, {} rows", tier.points().len(), tier.spectators().len());
            for (i, p) in tier.points().iter().enumerate() {
                let _ = writeln!(out, "  p{i:<3} {:>10.DECIMALS$} {:>10.DECIMALS$}", p.x, p.y);
            }
            for (row, (eye, c)) in eyes[t].iter().zip(&c_values[t]).enumerate() {
                let _ = writeln!(
                    out,
                    "  row {row:<3} {label} eye {:>10.DECIMALS$} {:>10.DECIMALS$}  C {:>8.DECIMALS$}",
                    eye.x, eye.y, c
                );
            }
        }
        out
    }

    fn points_csv(section: &Section) -> String {
        let mut out = String::from("tier,index,x,y,z\n");
        for (t, points) in section.profile_points_3d().iter().enumerate() {
            for (i, p) in points.iter().enumerate() {
                let _ = writeln!(out, "{t},{i},{:.DECIMALS$},{:.DECIMALS$},{:.DECIMALS$}", p.x, p.y, p.z);
            }
        }
        out
    }

    fn write_text_file(path: &Path, text: &str, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }
        fs::write(path, text).map_err(|e| format!("write {}: {e}", path.display()))
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }
    }
}
