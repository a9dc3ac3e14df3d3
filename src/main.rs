use clap::Parser;

use i2loc_translate::{
    IcuPluralRules, TranslationBatch, Translator, WebServiceClient, create_queries,
};

/// Translate a localization term through the I2 Localization web service.
#[derive(Debug, Parser)]
#[command(name = "i2loc-translate", version, about)]
struct Args {
    /// Text to translate; may contain {[params]}, tag pairs, <i2nt> spans
    /// and [i2p_...] plural segments
    text: String,

    /// Source language code ("auto" lets the service detect it)
    #[arg(long, default_value = "auto")]
    from: String,

    /// Target language code; repeat for several languages
    #[arg(long, required = true)]
    to: Vec<String>,

    /// Web service URL; falls back to $I2LOC_WEB_SERVICE_URL
    #[arg(long)]
    url: Option<String>,

    /// Print the completed query batch as JSON instead of plain results
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let client = match &args.url {
        Some(url) => WebServiceClient::new(url.clone())?,
        None => WebServiceClient::from_env()?,
    };
    let translator = Translator::new(client);

    if args.json {
        let rules = IcuPluralRules::new();
        let mut batch = TranslationBatch::new();
        for to in &args.to {
            create_queries(&args.text, &args.from, to, &rules, &mut batch);
        }
        translator.translate_batch(&mut batch).await?;
        println!("{}", serde_json::to_string_pretty(&batch)?);
    } else {
        for to in &args.to {
            let result = translator.translate(&args.text, &args.from, to).await?;
            println!("{}: {}", to, result);
        }
    }
    Ok(())
}
