//! Toolbar buttons and the edit commands they resolve to.

use inkpad_core::{BlockType, EditCommand, MarkType, SelectionState};

/// What a toolbar button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Mark(MarkType),
    Block(BlockType),
    /// Opens the file picker; the upload itself goes through
    /// [`EditorSession::upload_image`](crate::EditorSession::upload_image).
    UploadImage,
}

/// A toolbar button and its material icon name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarButton {
    pub action: ToolbarAction,
    pub icon: &'static str,
}

/// Buttons in display order.
pub const BUTTONS: [ToolbarButton; 10] = [
    ToolbarButton {
        action: ToolbarAction::Mark(MarkType::Bold),
        icon: "format_bold",
    },
    ToolbarButton {
        action: ToolbarAction::Mark(MarkType::Italic),
        icon: "format_italic",
    },
    ToolbarButton {
        action: ToolbarAction::Mark(MarkType::Underlined),
        icon: "format_underlined",
    },
    ToolbarButton {
        action: ToolbarAction::Mark(MarkType::Code),
        icon: "code",
    },
    ToolbarButton {
        action: ToolbarAction::Block(BlockType::HeadingOne),
        icon: "looks_one",
    },
    ToolbarButton {
        action: ToolbarAction::Block(BlockType::HeadingTwo),
        icon: "looks_two",
    },
    ToolbarButton {
        action: ToolbarAction::Block(BlockType::BlockQuote),
        icon: "format_quote",
    },
    ToolbarButton {
        action: ToolbarAction::Block(BlockType::OlList),
        icon: "format_list_numbered",
    },
    ToolbarButton {
        action: ToolbarAction::Block(BlockType::UlList),
        icon: "format_list_bulleted",
    },
    ToolbarButton {
        action: ToolbarAction::UploadImage,
        icon: "image",
    },
];

/// A button together with whether it shows as active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub button: ToolbarButton,
    pub active: bool,
}

/// Whether `action` is active for the current selection.
///
/// List buttons are active only when the selection holds list items whose
/// first block sits directly in a list of that type.
pub fn is_active(action: ToolbarAction, selection: &SelectionState) -> bool {
    match action {
        ToolbarAction::Mark(mark) => selection.has_mark(mark),
        ToolbarAction::Block(block) if block.is_list() => {
            !selection.blocks.is_empty()
                && selection.has_block(BlockType::ListItem)
                && selection.first_block_parent == Some(block)
        }
        ToolbarAction::Block(block) => selection.has_block(block),
        ToolbarAction::UploadImage => false,
    }
}

/// Every button with its active flag.
pub fn toolbar_state(selection: &SelectionState) -> Vec<ButtonState> {
    BUTTONS
        .iter()
        .map(|button| ButtonState {
            button: *button,
            active: is_active(button.action, selection),
        })
        .collect()
}

/// Commands for a mark button.
pub fn mark_commands(mark: MarkType) -> Vec<EditCommand> {
    vec![EditCommand::ToggleMark(mark)]
}

/// Commands for a block button.
pub fn block_commands(block: BlockType, selection: &SelectionState) -> Vec<EditCommand> {
    if block.is_list() {
        if selection.in_list {
            return vec![EditCommand::UnwrapList];
        }
        let other = match block {
            BlockType::UlList => BlockType::OlList,
            _ => BlockType::UlList,
        };
        return vec![EditCommand::UnwrapBlock(other), EditCommand::WrapBlock(block)];
    }

    let target = if selection.has_block(block) {
        BlockType::Paragraph
    } else {
        block
    };

    let mut commands = vec![EditCommand::SetBlocks(target)];
    if selection.has_block(BlockType::ListItem) {
        commands.push(EditCommand::UnwrapBlock(BlockType::UlList));
        commands.push(EditCommand::UnwrapBlock(BlockType::OlList));
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(blocks: &[BlockType]) -> SelectionState {
        SelectionState {
            blocks: blocks.to_vec(),
            ..SelectionState::default()
        }
    }

    fn in_list(list: BlockType) -> SelectionState {
        SelectionState {
            blocks: vec![BlockType::ListItem],
            first_block_parent: Some(list),
            in_list: true,
            item_depth: 1,
            ..SelectionState::default()
        }
    }

    #[test]
    fn test_button_order_and_icons() {
        let icons: Vec<&str> = BUTTONS.iter().map(|b| b.icon).collect();
        assert_eq!(
            icons,
            vec![
                "format_bold",
                "format_italic",
                "format_underlined",
                "code",
                "looks_one",
                "looks_two",
                "format_quote",
                "format_list_numbered",
                "format_list_bulleted",
                "image",
            ]
        );
    }

    #[test]
    fn test_mark_active() {
        let state = SelectionState {
            active_marks: vec![MarkType::Italic],
            ..SelectionState::default()
        };
        assert!(is_active(ToolbarAction::Mark(MarkType::Italic), &state));
        assert!(!is_active(ToolbarAction::Mark(MarkType::Bold), &state));
    }

    #[test]
    fn test_block_active() {
        let state = selection(&[BlockType::HeadingOne]);
        assert!(is_active(ToolbarAction::Block(BlockType::HeadingOne), &state));
        assert!(!is_active(ToolbarAction::Block(BlockType::HeadingTwo), &state));
    }

    #[test]
    fn test_list_active_only_for_matching_parent() {
        let state = in_list(BlockType::OlList);
        assert!(is_active(ToolbarAction::Block(BlockType::OlList), &state));
        assert!(!is_active(ToolbarAction::Block(BlockType::UlList), &state));
    }

    #[test]
    fn test_list_inactive_without_list_item() {
        let state = SelectionState {
            blocks: vec![BlockType::Paragraph],
            first_block_parent: Some(BlockType::UlList),
            ..SelectionState::default()
        };
        assert!(!is_active(ToolbarAction::Block(BlockType::UlList), &state));
    }

    #[test]
    fn test_list_inactive_with_empty_selection() {
        assert!(!is_active(
            ToolbarAction::Block(BlockType::UlList),
            &SelectionState::default()
        ));
    }

    #[test]
    fn test_upload_never_active() {
        assert!(!is_active(ToolbarAction::UploadImage, &in_list(BlockType::UlList)));
    }

    #[test]
    fn test_toolbar_state_covers_all_buttons() {
        let states = toolbar_state(&selection(&[BlockType::BlockQuote]));
        assert_eq!(states.len(), BUTTONS.len());
        let active: Vec<ToolbarAction> = states
            .iter()
            .filter(|s| s.active)
            .map(|s| s.button.action)
            .collect();
        assert_eq!(active, vec![ToolbarAction::Block(BlockType::BlockQuote)]);
    }

    #[test]
    fn test_mark_commands() {
        assert_eq!(
            mark_commands(MarkType::Code),
            vec![EditCommand::ToggleMark(MarkType::Code)]
        );
    }

    #[test]
    fn test_block_toggles_on() {
        assert_eq!(
            block_commands(BlockType::HeadingTwo, &selection(&[BlockType::Paragraph])),
            vec![EditCommand::SetBlocks(BlockType::HeadingTwo)]
        );
    }

    #[test]
    fn test_active_block_toggles_back_to_paragraph() {
        assert_eq!(
            block_commands(BlockType::BlockQuote, &selection(&[BlockType::BlockQuote])),
            vec![EditCommand::SetBlocks(BlockType::Paragraph)]
        );
    }

    #[test]
    fn test_block_inside_list_unwraps_both_lists() {
        assert_eq!(
            block_commands(BlockType::HeadingOne, &in_list(BlockType::UlList)),
            vec![
                EditCommand::SetBlocks(BlockType::HeadingOne),
                EditCommand::UnwrapBlock(BlockType::UlList),
                EditCommand::UnwrapBlock(BlockType::OlList),
            ]
        );
    }

    #[test]
    fn test_list_button_wraps_outside_list() {
        assert_eq!(
            block_commands(BlockType::UlList, &selection(&[BlockType::Paragraph])),
            vec![
                EditCommand::UnwrapBlock(BlockType::OlList),
                EditCommand::WrapBlock(BlockType::UlList),
            ]
        );
        assert_eq!(
            block_commands(BlockType::OlList, &selection(&[BlockType::Paragraph])),
            vec![
                EditCommand::UnwrapBlock(BlockType::UlList),
                EditCommand::WrapBlock(BlockType::OlList),
            ]
        );
    }

    #[test]
    fn test_list_button_unwraps_inside_list() {
        assert_eq!(
            block_commands(BlockType::OlList, &in_list(BlockType::UlList)),
            vec![EditCommand::UnwrapList]
        );
    }
}
