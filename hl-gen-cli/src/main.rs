use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::{debug, error, info, warn};

use hl_gen_core::corpus::{
	Archive, DEFAULT_ARCHIVE_PATH, DEFAULT_FEED_URL, DEFAULT_RANDOM_PAGE_URL, FeedClient, PageScraper,
};
use hl_gen_core::io::read_file;
use hl_gen_core::model::{Chain, GenerationInput, Generator};

/// Line printed after a generated headline that is not in the archive.
const NEW_HEADLINE: &str = "NEW HEADLINE";

#[derive(Parser, Debug)]
#[command(author, version, about = "Markov-chain headline generator", long_about = None)]
struct Cli {
	#[arg(
		long,
		global = true,
		env = "HL_GEN_ARCHIVE",
		default_value = DEFAULT_ARCHIVE_PATH,
		value_name = "PATH",
		help = "JSON archive of seen titles"
	)]
	archive: PathBuf,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Fetch the feed and merge its titles into the archive
	Fetch {
		#[command(flatten)]
		feed: FeedArgs,

		#[arg(long, value_name = "SECS", help = "Keep polling, pausing this many seconds between fetches")]
		watch: Option<u64>,
	},

	/// Scrape one headline per request from a random article page into the archive
	Scrape {
		#[arg(long, default_value = DEFAULT_RANDOM_PAGE_URL, value_name = "URL", help = "Page returning a random article")]
		url: String,

		#[arg(long, default_value_t = 10, value_name = "SECS", help = "HTTP timeout")]
		timeout: u64,

		#[arg(long, default_value_t = 1, value_name = "SECS", help = "Pause between requests")]
		interval: u64,

		#[arg(long, help = "Scrape a single page and exit")]
		once: bool,
	},

	/// Train on the archive and print one generated headline
	Generate {
		#[command(flatten)]
		chain: ChainArgs,

		#[arg(long, default_value_t = 25, help = "Maximum number of words to print")]
		words: usize,

		#[arg(long, default_value_t = 0, help = "Extra attempts when the output is already archived")]
		tries: usize,

		#[arg(long, value_name = "FILE", help = "Also train on a text file, one title per line")]
		corpus: Option<PathBuf>,
	},

	/// Fetch the feed and generate from it without touching the archive
	Live {
		#[command(flatten)]
		feed: FeedArgs,

		#[command(flatten)]
		chain: ChainArgs,

		#[arg(long, default_value_t = 20, help = "Maximum number of words to print")]
		words: usize,

		#[arg(long, help = "Print the trained chain before the headline")]
		dump: bool,
	},
}

#[derive(Args, Debug)]
struct FeedArgs {
	#[arg(long = "feed", default_value = DEFAULT_FEED_URL, value_name = "URL", help = "RSS feed to read titles from")]
	url: String,

	#[arg(long, default_value_t = 10, value_name = "SECS", help = "HTTP timeout")]
	timeout: u64,
}

impl FeedArgs {
	fn client(&self) -> anyhow::Result<FeedClient> {
		FeedClient::new(&self.url, Duration::from_secs(self.timeout)).context("failed to build HTTP client")
	}
}

#[derive(Args, Debug)]
struct ChainArgs {
	#[arg(long, default_value_t = 2, help = "Prefix length in words")]
	prefix: usize,
}

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	if let Err(err) = run(Cli::parse()) {
		error!("{:#}", err);
		std::process::exit(1);
	}
}

fn run(cli: Cli) -> anyhow::Result<()> {
	match cli.command {
		Command::Fetch { feed, watch } => fetch(&cli.archive, &feed, watch),
		Command::Scrape { url, timeout, interval, once } => {
			let scraper = PageScraper::new(&url, Duration::from_secs(timeout)).context("failed to build HTTP client")?;
			scrape(&cli.archive, &scraper, (!once).then(|| Duration::from_secs(interval)))
		}
		Command::Generate { chain, words, tries, corpus } => {
			let input = GenerationInput::new(chain.prefix, words, tries)?;
			generate(&cli.archive, &input, corpus.as_deref())
		}
		Command::Live { feed, chain, words, dump } => {
			let input = GenerationInput::new(chain.prefix, words, 0)?;
			live(&feed, &input, dump)
		}
	}
}

/// Merges freshly collected titles into the archive on disk, returning the number of new titles.
fn merge_into_archive<F>(archive_path: &Path, collect: F) -> anyhow::Result<usize>
where
	F: FnOnce() -> anyhow::Result<Vec<String>>,
{
	let mut archive = Archive::load_or_default(archive_path)
		.with_context(|| format!("failed to load archive {}", archive_path.display()))?;
	let titles = collect()?;

	let added = archive.merge(titles);
	archive
		.save(archive_path)
		.with_context(|| format!("failed to save archive {}", archive_path.display()))?;

	info!("{} new titles, {} archived", added, archive.len());
	Ok(added)
}

/// Runs `step` once, or forever with `pause` between runs, logging failures.
fn repeat<F>(pause: Option<Duration>, mut step: F) -> anyhow::Result<()>
where
	F: FnMut() -> anyhow::Result<usize>,
{
	let pause = match pause {
		None => return step().map(|_| ()),
		Some(pause) => pause,
	};

	loop {
		if let Err(err) = step() {
			error!("{:#}", err);
		}
		thread::sleep(pause);
	}
}

fn fetch(archive_path: &Path, feed: &FeedArgs, watch: Option<u64>) -> anyhow::Result<()> {
	let client = feed.client()?;

	repeat(watch.map(Duration::from_secs), || {
		merge_into_archive(archive_path, || {
			client.fetch_titles().with_context(|| format!("failed to fetch {}", client.url()))
		})
	})
}

fn scrape(archive_path: &Path, scraper: &PageScraper, pause: Option<Duration>) -> anyhow::Result<()> {
	repeat(pause, || {
		merge_into_archive(archive_path, || {
			let title = scraper.fetch_title().with_context(|| format!("failed to scrape {}", scraper.url()))?;
			Ok(title.into_iter().collect())
		})
	})
}

fn generate(archive_path: &Path, input: &GenerationInput, corpus: Option<&Path>) -> anyhow::Result<()> {
	let archive = Archive::load(archive_path)
		.with_context(|| format!("failed to load archive {}", archive_path.display()))?;

	let mut chain = Chain::new(input.prefix_len())?;
	chain.train_all(archive.titles());

	if let Some(path) = corpus {
		let lines = read_file(path).with_context(|| format!("failed to read corpus {}", path.display()))?;
		chain.train_all(&lines);
	}
	if chain.is_empty() {
		warn!("no titles to train on in {}", archive_path.display());
	}
	debug!("chain has {} prefixes", chain.len());

	let text = Generator::new(&chain).generate_from_input(input, |t| archive.contains(t));
	println!("{}", text);

	if !archive.contains(&text) {
		println!("{}", NEW_HEADLINE);
	}
	Ok(())
}

fn live(feed: &FeedArgs, input: &GenerationInput, dump: bool) -> anyhow::Result<()> {
	let client = feed.client()?;
	let titles = client.fetch_titles().with_context(|| format!("failed to fetch {}", client.url()))?;

	let mut chain = Chain::new(input.prefix_len())?;
	chain.train_all(&titles);
	if chain.is_empty() {
		warn!("feed {} had no titles", client.url());
	}

	if dump {
		println!("Chain: {:?}", chain);
	}
	println!("{}", Generator::new(&chain).generate(input.max_words));
	Ok(())
}
