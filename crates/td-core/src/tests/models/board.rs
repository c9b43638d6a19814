use crate::Board;

use uuid::Uuid;

#[test]
fn test_board_new() {
    let owner = Uuid::new_v4();
    let board = Board::new("Sprint Board".to_string(), owner);

    assert_eq!(board.title, "Sprint Board");
    assert_eq!(board.owner_id, owner);
    assert!(board.collaborators.is_empty());
}

#[test]
fn test_board_membership() {
    let owner = Uuid::new_v4();
    let collaborator = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let mut board = Board::new("Team".to_string(), owner);
    board.collaborators.push(collaborator);

    assert!(board.is_member(owner));
    assert!(board.is_member(collaborator));
    assert!(!board.is_member(stranger));
}
