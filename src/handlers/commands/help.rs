//! Help command handler

use crate::handlers::BotContext;
use crate::models::IncomingMessage;
use crate::services::OutgoingMessage;
use crate::utils::errors::Result;

/// Roster commands, in legacy Markdown
pub const HELP_TEXT: &str = "The following commands are now available to you.
```
 /me    - to tell me of your desire to attend the event.
 /me+2  - as above but you're bringing two friends, how wonderful!
 /out   - to let me know you can no longer attend, how dreadful.
 /sub 1 - if it turns out that one of your friends cannot come.
 /count - to see how many people are coming, including their wonderful extras.
 /who   - for a list of who is coming.
```";

/// Handle /help command
pub async fn handle_help(ctx: &BotContext, message: &IncomingMessage) -> Result<()> {
    ctx.send(OutgoingMessage::new(message.chat_id, HELP_TEXT).markdown().silent())
        .await?;
    Ok(())
}
