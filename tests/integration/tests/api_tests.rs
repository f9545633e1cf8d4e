//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, font_available,
    TestServer,
};
use reqwest::StatusCode;

/// Register a fresh user and log them in
async fn signed_up(server: &TestServer) -> (UserCreatedResponse, TokenResponse) {
    let register = RegisterRequest::unique();
    let response = server.post("/api/users", &register).await.unwrap();
    let user: UserCreatedResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/api/auth/token/login", &LoginRequest::from_register(&register))
        .await
        .unwrap();
    let tokens: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();

    (user, tokens)
}

async fn create_recipe(server: &TestServer, token: &str) -> RecipeResponse {
    let response = server
        .post_auth("/api/recipes", token, &CreateRecipeRequest::unique())
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
    assert_eq!(body["checks"]["redis"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/users", &request).await.unwrap();
    let user: UserCreatedResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(user.username, request.username);
    assert_eq!(user.email, request.email);
    assert!(!user.id.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    server.post("/api/users", &request).await.unwrap();

    let mut again = RegisterRequest::unique();
    again.email = request.email.clone();
    let response = server.post("/api/users", &again).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_register_rejects_reserved_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.username = "me".to_string();

    let response = server.post("/api/users", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login = LoginRequest {
        email: "nobody@example.com".to_string(),
        password: "wrong-password".to_string(),
    };

    let response = server.post("/api/auth/token/login", &login).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token_is_single_use() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, tokens) = signed_up(&server).await;
    assert_eq!(tokens.token_type, "Bearer");
    assert!(tokens.expires_in > 0);

    let refresh = RefreshTokenRequest {
        refresh_token: tokens.refresh_token,
    };
    let response = server.post("/api/auth/token/refresh", &refresh).await.unwrap();
    let renewed: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!renewed.auth_token.is_empty());

    // The consumed token cannot be replayed
    let response = server.post("/api/auth/token/refresh", &refresh).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_revokes_refresh_tokens() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, tokens) = signed_up(&server).await;

    let response = server
        .post_auth("/api/auth/token/logout", &tokens.auth_token, &())
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let refresh = RefreshTokenRequest {
        refresh_token: tokens.refresh_token,
    };
    let response = server.post("/api/auth/token/refresh", &refresh).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_get_current_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (created, tokens) = signed_up(&server).await;

    let response = server
        .get_auth("/api/users/me", &tokens.auth_token)
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(user.id, created.id);
    assert_eq!(user.first_name, "Anna");
    assert!(!user.is_subscribed);
}

#[tokio::test]
async fn test_get_current_user_unauthorized() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/users/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_list_users_is_paginated() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    signed_up(&server).await;
    signed_up(&server).await;

    let response = server.get("/api/users?limit=1").await.unwrap();
    let page: Page<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(page.results.len(), 1);
    assert!(page.count >= 2);
    assert!(page.next.unwrap().contains("page=2"));
    assert!(page.previous.is_none());
}

#[tokio::test]
async fn test_set_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register = RegisterRequest::unique();
    server.post("/api/users", &register).await.unwrap();
    let response = server
        .post("/api/auth/token/login", &LoginRequest::from_register(&register))
        .await
        .unwrap();
    let tokens: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let wrong = SetPasswordRequest {
        new_password: "Syrniki-2024".to_string(),
        current_password: "not-my-password".to_string(),
    };
    let response = server
        .post_auth("/api/users/set_password", &tokens.auth_token, &wrong)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let change = SetPasswordRequest {
        new_password: "Syrniki-2024".to_string(),
        current_password: register.password.clone(),
    };
    let response = server
        .post_auth("/api/users/set_password", &tokens.auth_token, &change)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let login = LoginRequest {
        email: register.email.clone(),
        password: "Syrniki-2024".to_string(),
    };
    let response = server.post("/api/auth/token/login", &login).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Subscription Tests
// ============================================================================

#[tokio::test]
async fn test_subscribe_and_unsubscribe() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, reader) = signed_up(&server).await;
    let (author, author_tokens) = signed_up(&server).await;
    create_recipe(&server, &author_tokens.auth_token).await;
    create_recipe(&server, &author_tokens.auth_token).await;

    let path = format!("/api/users/{}/subscribe?recipes_limit=1", author.id);
    let response = server
        .post_auth(&path, &reader.auth_token, &())
        .await
        .unwrap();
    let subscription: SubscriptionResponse =
        assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(subscription.user.is_subscribed);
    assert_eq!(subscription.recipes.len(), 1);
    assert_eq!(subscription.recipes_count, 2);

    let response = server
        .post_auth(&path, &reader.auth_token, &())
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "ALREADY_SUBSCRIBED");

    let response = server
        .get_auth("/api/users/subscriptions", &reader.auth_token)
        .await
        .unwrap();
    let page: Page<SubscriptionResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.results[0].user.id, author.id);

    let path = format!("/api/users/{}/subscribe", author.id);
    let response = server.delete_auth(&path, &reader.auth_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.delete_auth(&path, &reader.auth_token).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "NOT_SUBSCRIBED");
}

#[tokio::test]
async fn test_cannot_subscribe_to_self() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (user, tokens) = signed_up(&server).await;

    let response = server
        .post_auth(
            &format!("/api/users/{}/subscribe", user.id),
            &tokens.auth_token,
            &(),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "CANNOT_SUBSCRIBE_TO_SELF");
}

// ============================================================================
// Reference Data Tests
// ============================================================================

#[tokio::test]
async fn test_list_tags() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/tags").await.unwrap();
    let tags: Vec<TagResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(tags.iter().any(|t| t.slug == "breakfast" && t.color.starts_with('#')));
}

#[tokio::test]
async fn test_search_ingredients_by_prefix() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/ingredients?name=мол").await.unwrap();
    let ingredients: Vec<IngredientResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();

    assert!(!ingredients.is_empty());
    assert!(ingredients[0].name.starts_with("мол"));
    assert!(ingredients.iter().all(|i| i.name.contains("мол")));
}

#[tokio::test]
async fn test_unknown_ingredient() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/ingredients/999999").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get("/api/ingredients/not-a-number").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Recipe Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_recipe() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (author, tokens) = signed_up(&server).await;
    let recipe = create_recipe(&server, &tokens.auth_token).await;

    assert_eq!(recipe.author.id, author.id);
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(recipe.tags[0].slug, "lunch");
    assert!(!recipe.is_favorited);
    assert!(recipe.image.starts_with("/media/") && recipe.image.ends_with(".png"));

    // Anonymous readers see the same recipe with false flags
    let response = server
        .get(&format!("/api/recipes/{}", recipe.id))
        .await
        .unwrap();
    let fetched: RecipeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.name, recipe.name);
    assert_eq!(fetched.cooking_time, 90);

    let response = server.get(&recipe.image).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_create_recipe_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/recipes", &CreateRecipeRequest::unique())
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_create_recipe_validation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, tokens) = signed_up(&server).await;

    let mut no_ingredients = CreateRecipeRequest::unique();
    no_ingredients.ingredients.clear();
    let response = server
        .post_auth("/api/recipes", &tokens.auth_token, &no_ingredients)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let mut duplicate = CreateRecipeRequest::unique();
    duplicate.ingredients.push(duplicate.ingredients[0].clone());
    let response = server
        .post_auth("/api/recipes", &tokens.auth_token, &duplicate)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let mut unknown = CreateRecipeRequest::unique();
    unknown.ingredients[0].id = 999_999;
    let response = server
        .post_auth("/api/recipes", &tokens.auth_token, &unknown)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let mut bad_image = CreateRecipeRequest::unique();
    bad_image.image = "data:text/plain;base64,aGVsbG8=".to_string();
    let response = server
        .post_auth("/api/recipes", &tokens.auth_token, &bad_image)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_update_recipe_only_by_author() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = signed_up(&server).await;
    let (_, stranger) = signed_up(&server).await;
    let recipe = create_recipe(&server, &author.auth_token).await;
    let path = format!("/api/recipes/{}", recipe.id);

    let update = UpdateRecipeRequest {
        name: Some("Green borscht".to_string()),
        cooking_time: Some(60),
        tags: Some(vec![TAG_BREAKFAST, TAG_LUNCH]),
    };

    let response = server
        .patch_auth(&path, &stranger.auth_token, &update)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch_auth(&path, &author.auth_token, &update)
        .await
        .unwrap();
    let updated: RecipeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.name, "Green borscht");
    assert_eq!(updated.cooking_time, 60);
    assert_eq!(updated.tags.len(), 2);
    // Omitted fields keep their values
    assert_eq!(updated.ingredients.len(), 2);
    assert_eq!(updated.image, recipe.image);
}

#[tokio::test]
async fn test_delete_recipe() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = signed_up(&server).await;
    let (_, stranger) = signed_up(&server).await;
    let recipe = create_recipe(&server, &author.auth_token).await;
    let path = format!("/api/recipes/{}", recipe.id);

    let response = server.delete_auth(&path, &stranger.auth_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete_auth(&path, &author.auth_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_list_recipes_by_author_and_tag() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (author, tokens) = signed_up(&server).await;
    create_recipe(&server, &tokens.auth_token).await;
    create_recipe(&server, &tokens.auth_token).await;

    let response = server
        .get(&format!("/api/recipes?author={}&tags=lunch&tags=dinner", author.id))
        .await
        .unwrap();
    let page: Page<RecipeResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.count, 2);
    assert!(page.results.iter().all(|r| r.author.id == author.id));

    let response = server
        .get(&format!("/api/recipes?author={}&tags=breakfast", author.id))
        .await
        .unwrap();
    let page: Page<RecipeResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.count, 0);
}

#[tokio::test]
async fn test_anonymous_flag_filters_return_nothing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/recipes?is_favorited=1").await.unwrap();
    let page: Page<RecipeResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.count, 0);
    assert!(page.results.is_empty());
}

// ============================================================================
// Favorite Tests
// ============================================================================

#[tokio::test]
async fn test_favorites() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = signed_up(&server).await;
    let (_, reader) = signed_up(&server).await;
    let recipe = create_recipe(&server, &author.auth_token).await;
    let path = format!("/api/recipes/{}/favorite", recipe.id);

    let response = server.post_auth(&path, &reader.auth_token, &()).await.unwrap();
    let short: RecipeShortResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(short.id, recipe.id);

    let response = server.post_auth(&path, &reader.auth_token, &()).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "ALREADY_FAVORITED");

    let response = server
        .get_auth("/api/recipes?is_favorited=1", &reader.auth_token)
        .await
        .unwrap();
    let page: Page<RecipeResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.count, 1);
    assert!(page.results[0].is_favorited);

    let response = server.delete_auth(&path, &reader.auth_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.delete_auth(&path, &reader.auth_token).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "NOT_FAVORITED");
}

#[tokio::test]
async fn test_favorite_unknown_recipe() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, tokens) = signed_up(&server).await;

    let response = server
        .post_auth("/api/recipes/999999/favorite", &tokens.auth_token, &())
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Shopping Cart Tests
// ============================================================================

#[tokio::test]
async fn test_shopping_cart() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = signed_up(&server).await;
    let (_, shopper) = signed_up(&server).await;
    let first = create_recipe(&server, &author.auth_token).await;
    let second = create_recipe(&server, &author.auth_token).await;

    for recipe in [&first, &second] {
        let response = server
            .post_auth(
                &format!("/api/recipes/{}/shopping_cart", recipe.id),
                &shopper.auth_token,
                &(),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .post_auth(
            &format!("/api/recipes/{}/shopping_cart", first.id),
            &shopper.auth_token,
            &(),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "ALREADY_IN_SHOPPING_CART");

    let response = server
        .get_auth("/api/recipes?is_in_shopping_cart=true", &shopper.auth_token)
        .await
        .unwrap();
    let page: Page<RecipeResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.count, 2);
    assert!(page.results.iter().all(|r| r.is_in_shopping_cart));

    let response = server
        .delete_auth(
            &format!("/api/recipes/{}/shopping_cart", second.id),
            &shopper.auth_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_download_shopping_cart() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    if !font_available(&server.config) {
        eprintln!("Skipping test: shopping list font not installed");
        return;
    }

    let (_, tokens) = signed_up(&server).await;
    let recipe = create_recipe(&server, &tokens.auth_token).await;
    server
        .post_auth(
            &format!("/api/recipes/{}/shopping_cart", recipe.id),
            &tokens.auth_token,
            &(),
        )
        .await
        .unwrap();

    let response = server
        .get_auth("/api/recipes/download_shopping_cart", &tokens.auth_token)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/pdf"
    );
    assert!(response.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .contains("shopping_list.pdf"));

    let bytes = response.bytes().await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_download_shopping_cart_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/api/recipes/download_shopping_cart")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}
