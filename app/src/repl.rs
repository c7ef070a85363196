//! Interactive terminal loop, the presentation collaborator of the core.
//!
//! Renders the transcript as it grows and feeds submissions into the
//! controller. All conversation rules (trimming, single-flight, the
//! fallback notice) live in the controller; the loop only reads lines
//! and prints whatever the transcript gained.

use std::io::Write;

use holochat_core::ChatBackend;
use holochat_session::SessionController;

pub async fn run<B: ChatBackend>(
    controller: &mut SessionController<B>,
) -> anyhow::Result<()> {
    if let Some(greeting) = controller.transcript().first() {
        println!("{}\n", greeting.content);
    }
    println!("Type 'exit', 'quit', or Ctrl+C to end the session.\n");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if matches!(input, "exit" | "quit" | "q") {
            let turns = controller.transcript().len() / 2;
            println!("\nSession ended. Total turns: {turns}");
            break;
        }

        // Empty lines and re-submissions while busy are both dropped by
        // the controller; nothing to print in that case.
        if !controller.submit(input).await {
            continue;
        }

        if let Some(reply) = controller.transcript().last() {
            println!("\n{}\n", reply.content);
        }
    }

    Ok(())
}
