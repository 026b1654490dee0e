//! 环形分段生成器命令行入口
//!
//! 子命令：
//! - `generate`: 由任务文件或单元定义行生成 DXF 和 PDF
//! - `unit`: 单个单元快速导出 DXF
//! - `info`: 打印单元清单
//! - `inspect`: 回读 DXF 并恢复分段尺寸

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ringseg_core::input_parser::InputParser;
use ringseg_core::segment::{MeasuredOn, SegmentGeometry, SegmentSpec, SpanInput};
use ringseg_core::unit::{ProjectInfo, Unit, UnitSchedule};
use ringseg_file::{dxf_io, job, pdf, DxfOptions, Job, Orientation, PageSetup, PaperSize, ReportOptions};

#[derive(Parser)]
#[command(name = "ringseg", version)]
#[command(about = "Generate DXF files and technical drawings for curved stone units")]
struct Cli {
    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate DXF files and a PDF drawing for a set of units
    Generate(GenerateArgs),
    /// Export a single unit to DXF
    Unit(UnitArgs),
    /// Print the unit schedule
    Info(InfoArgs),
    /// Recover ring segment dimensions from a DXF file
    Inspect {
        /// DXF file to read
        file: PathBuf,
    },
}

/// 单元来源：任务文件 + 单元定义行
#[derive(Args)]
struct SourceArgs {
    /// JSON job file
    #[arg(short, long)]
    job: Option<PathBuf>,

    /// Unit definition, e.g. "Type-A inner=1000 outer=1200 chord=500"
    #[arg(short, long = "unit")]
    units: Vec<String>,

    /// Write the combined units and project info to a job file
    #[arg(long)]
    save_job: Option<PathBuf>,
}

#[derive(Args)]
struct ProjectArgs {
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    project: Option<String>,
    #[arg(long)]
    customer: Option<String>,
    /// Order number
    #[arg(long)]
    order: Option<String>,
}

impl From<ProjectArgs> for ProjectInfo {
    fn from(args: ProjectArgs) -> Self {
        ProjectInfo {
            company: args.company,
            project: args.project,
            customer: args.customer,
            order_number: args.order,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
}

#[derive(Args)]
struct GenerateArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    project: ProjectArgs,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// PDF file name (inside the output directory)
    #[arg(long)]
    pdf: Option<String>,

    /// Skip the PDF drawing
    #[arg(long)]
    no_pdf: bool,

    /// Skip the DXF files
    #[arg(long)]
    no_dxf: bool,

    /// Add dimensions and labels to the DXF files
    #[arg(long)]
    annotate: bool,

    /// Write each outline as one closed polyline instead of arcs and lines
    #[arg(long)]
    polyline: bool,

    /// Bundle the DXF files into one ZIP archive
    #[arg(long, conflicts_with = "no_dxf")]
    zip: bool,

    #[arg(long, value_enum, default_value = "a3")]
    paper: PaperArg,

    /// Portrait instead of landscape sheets
    #[arg(long)]
    portrait: bool,

    /// Maximum units per sheet
    #[arg(long, default_value_t = 9)]
    per_sheet: usize,

    /// Drawing title in the title block
    #[arg(long, default_value = "Ring Segments")]
    title: String,

    /// Drawing number in the title block
    #[arg(long)]
    drawing_number: Option<String>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SpanArgs {
    /// Chord length (mm)
    #[arg(long)]
    chord: Option<f64>,
    /// Arc length (mm)
    #[arg(long)]
    arc: Option<f64>,
    /// Angle (degrees)
    #[arg(long)]
    angle: Option<f64>,
}

impl SpanArgs {
    fn to_span(&self) -> Result<SpanInput> {
        match (self.chord, self.arc, self.angle) {
            (Some(chord), None, None) => Ok(SpanInput::Chord(chord)),
            (None, Some(arc), None) => Ok(SpanInput::Arc(arc)),
            (None, None, Some(angle)) => Ok(SpanInput::Angle(angle)),
            _ => bail!("Must specify exactly one of --chord, --arc or --angle"),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    Inner,
    Outer,
}

#[derive(Args)]
struct UnitArgs {
    /// Unit ID/type
    #[arg(long)]
    id: String,

    /// Inner radius (mm)
    #[arg(long)]
    inner: Option<f64>,

    /// Outer radius (mm)
    #[arg(long)]
    outer: Option<f64>,

    /// Depth between inner and outer radius (mm)
    #[arg(long)]
    depth: Option<f64>,

    #[command(flatten)]
    span: SpanArgs,

    /// Radius on which chord/arc was measured
    #[arg(long, value_enum, default_value = "outer")]
    on: SideArg,

    /// Slab thickness (mm)
    #[arg(long)]
    thickness: Option<f64>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Add dimensions and labels to the DXF file
    #[arg(long)]
    annotate: bool,

    /// Write the outline as one closed polyline instead of arcs and lines
    #[arg(long)]
    polyline: bool,
}

#[derive(Args)]
struct InfoArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Print computed geometry as JSON
    #[arg(long)]
    json: bool,
}

/// 合并任务文件、单元定义行和命令行项目信息
fn build_schedule(source: &SourceArgs, project: ProjectInfo) -> Result<(ProjectInfo, UnitSchedule)> {
    let mut job = match &source.job {
        Some(path) => job::load(path).with_context(|| format!("Failed to load job {}", path.display()))?,
        None => Job::default(),
    };
    job.project.merge(project);

    for line in &source.units {
        let (id, spec) = InputParser::parse_unit(line).with_context(|| format!("Invalid unit: {}", line))?;
        job.units.push(ringseg_file::UnitEntry { id, spec });
    }

    let schedule = job.to_schedule()?;
    if schedule.is_empty() {
        bail!("No units given; use --job or --unit");
    }

    if let Some(path) = &source.save_job {
        job::save(&Job::from_schedule(job.project.clone(), &schedule), path)?;
    }

    Ok((job.project, schedule))
}

fn print_schedule(schedule: &UnitSchedule) {
    println!(
        "{:<16} {:>10} {:>10} {:>9} {:>10} {:>10}",
        "Unit", "Inner R", "Outer R", "Angle", "Chord", "Arc"
    );
    for unit in schedule {
        let g = &unit.geometry;
        println!(
            "{:<16} {:>10.0} {:>10.0} {:>8.1}° {:>10.0} {:>10.0}",
            unit.id, g.inner_radius, g.outer_radius, g.angle_degrees, g.outer_chord_length, g.outer_arc_length
        );
    }
}

fn print_geometry(g: &SegmentGeometry) {
    println!("Inner Radius: {:.0} mm", g.inner_radius);
    println!("Outer Radius: {:.0} mm", g.outer_radius);
    println!("Depth:        {:.0} mm", g.depth);
    println!("Angle:        {:.1}°", g.angle_degrees);
    println!("Chord Length: {:.0} mm (inner {:.0} mm)", g.outer_chord_length, g.inner_chord_length);
    println!("Arc Length:   {:.0} mm (inner {:.0} mm)", g.outer_arc_length, g.inner_arc_length);
    println!("Rise:         {:.1} mm", g.outer_rise());
    println!("Area:         {:.3} m²", g.area() / 1.0e6);
    if let Some(volume) = g.volume() {
        println!("Volume:       {:.4} m³", volume / 1.0e9);
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let (project, schedule) = build_schedule(&args.source, args.project.into())?;

    if args.no_dxf && args.no_pdf {
        bail!("Nothing to do: both --no-dxf and --no-pdf given");
    }
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("Failed to create {}", args.out.display()))?;

    if !args.no_dxf {
        let options = DxfOptions {
            annotate: args.annotate,
            polyline: args.polyline,
        };
        if args.zip {
            let path = args
                .out
                .join(format!("ring_segments_{}.zip", Local::now().format("%Y%m%d_%H%M%S")));
            dxf_io::export_zip(&schedule, &options, &path)?;
            println!("ZIP: {}", path.display());
        } else {
            let paths = dxf_io::export_all(&schedule, &args.out, &options)?;
            for path in &paths {
                println!("DXF: {}", path.display());
            }
        }
    }

    if !args.no_pdf {
        let options = ReportOptions {
            page: PageSetup {
                paper: match args.paper {
                    PaperArg::A3 => PaperSize::A3,
                    PaperArg::A4 => PaperSize::A4,
                },
                orientation: if args.portrait {
                    Orientation::Portrait
                } else {
                    Orientation::Landscape
                },
            },
            units_per_sheet: args.per_sheet,
            drawing_title: args.title,
            drawing_number: args.drawing_number,
            ..Default::default()
        };
        let name = args
            .pdf
            .unwrap_or_else(|| format!("technical_drawing_{}.pdf", Local::now().format("%Y%m%d_%H%M%S")));
        let path = args.out.join(name);
        pdf::export(&schedule, &project, &options, &path)?;
        println!("PDF: {}", path.display());
    }

    info!("Generated output for {} units", schedule.len());
    Ok(())
}

fn run_unit(args: UnitArgs) -> Result<()> {
    let radial = InputParser::radial_from(args.inner, args.outer, args.depth)?;
    let mut spec = SegmentSpec::new(radial, args.span.to_span()?).measured_on(match args.on {
        SideArg::Inner => MeasuredOn::Inner,
        SideArg::Outer => MeasuredOn::Outer,
    });
    spec.thickness = args.thickness;

    let unit = Unit::new(args.id, spec)?;
    print_geometry(&unit.geometry);

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("Failed to create {}", args.out.display()))?;
    let path = args.out.join(format!("{}.dxf", dxf_io::file_stem_for(&unit.id)));
    let options = DxfOptions {
        annotate: args.annotate,
        polyline: args.polyline,
    };
    dxf_io::export(&unit, &options, &path)?;
    println!("DXF: {}", path.display());
    Ok(())
}

fn run_info(args: InfoArgs) -> Result<()> {
    let (_, schedule) = build_schedule(&args.source, ProjectInfo::default())?;
    if args.json {
        let units: Vec<&Unit> = schedule.iter().collect();
        println!("{}", serde_json::to_string_pretty(&units)?);
    } else {
        print_schedule(&schedule);
    }
    Ok(())
}

fn run_inspect(file: &Path) -> Result<()> {
    let geometries = dxf_io::import(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let geometry = dxf_io::recover_segment(&geometries)?;
    print_geometry(&geometry);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing::subscriber::set_global_default(FmtSubscriber::builder().with_max_level(level).finish())?;

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Unit(args) => run_unit(args),
        Command::Info(args) => run_info(args),
        Command::Inspect { file } => run_inspect(&file),
    }
}
