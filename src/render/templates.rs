// Built-in Tera templates. Names end in `.html` so autoescaping applies.

pub const BASE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% block title %}{{ site_name }}{% endblock title %}</title>
  <link rel="canonical" href="{{ canonical | safe }}">
</head>
<body>
  <header><a href="/">{{ site_name }}</a></header>
  <main>
{% block content %}{% endblock content %}
  </main>
  <footer>{{ site_name }}</footer>
</body>
</html>
"#;

pub const INDEX_HTML: &str = r#"{% extends "base.html" %}
{% block content %}
    <h1>{{ site_name }}</h1>
    <p>{{ business_count }} salons in {{ states | length }} states</p>
    <section>
      <h2>Browse by state</h2>
      <ul>
      {% for state in states %}
        <li><a href="/{{ state.path | safe }}">{{ state.name }}</a> ({{ state.salon_count }})</li>
      {% endfor %}
      </ul>
    </section>
    <section>
      <h2>Browse by category</h2>
      <ul>
      {% for category in categories %}
        <li><a href="/{{ category.path | safe }}">{{ category.name }}</a> ({{ category.salon_count }})</li>
      {% endfor %}
      </ul>
    </section>
{% endblock content %}
"#;

pub const STATE_HTML: &str = r#"{% extends "base.html" %}
{% block title %}Salons in {{ state.state }} | {{ site_name }}{% endblock title %}
{% block content %}
    <h1>Salons in {{ state.state }}</h1>
    <p>{{ state.salon_count }} salons across {{ state.city_count }} cities</p>
    <ul>
    {% for city in cities %}
      <li><a href="/{{ city.path | safe }}">{{ city.name }}</a> ({{ city.salon_count }})</li>
    {% endfor %}
    </ul>
{% endblock content %}
"#;

pub const CITY_HTML: &str = r#"{% extends "base.html" %}
{% block title %}Salons in {{ city.city }}{% if city.state_name %}, {{ city.state_name }}{% endif %} | {{ site_name }}{% endblock title %}
{% block content %}
    <h1>Salons in {{ city.city }}</h1>
    {% if state %}<p><a href="/{{ state.path | safe }}">{{ state.name }}</a></p>{% endif %}
    <ul>
    {% for listing in listings %}
      <li>
        <a href="/{{ listing.path | safe }}">{{ listing.title }}</a>
        {% if listing.stars %}<span class="stars">{{ listing.stars }}</span>{% endif %}
        {% if listing.address %}<address>{{ listing.address }}</address>{% endif %}
      </li>
    {% endfor %}
    </ul>
{% endblock content %}
"#;

pub const CATEGORY_HTML: &str = r#"{% extends "base.html" %}
{% block title %}{{ category.category }} | {{ site_name }}{% endblock title %}
{% block content %}
    <h1>{{ category.category }}</h1>
    <p>{{ category.salon_count }} salons</p>
    <ul>
    {% for listing in listings %}
      <li><a href="/{{ listing.path | safe }}">{{ listing.title }}</a>{% if listing.location %} &middot; {{ listing.location }}{% endif %}</li>
    {% endfor %}
    </ul>
{% endblock content %}
"#;

pub const BUSINESS_HTML: &str = r#"{% extends "base.html" %}
{% block title %}{{ business.title }}{% if location %} - {{ location }}{% endif %} | {{ site_name }}{% endblock title %}
{% block content %}
    <article>
      <h1>{{ business.title }}</h1>
      {% if stars %}<p class="rating"><span class="stars">{{ stars }}</span>{% if business.reviews %} {{ business.reviews }} reviews{% endif %}</p>{% endif %}
      <nav>
        {% if city %}<a href="/{{ city.path | safe }}">{{ city.name }}</a>{% endif %}
        {% if state %}<a href="/{{ state.path | safe }}">{{ state.name }}</a>{% endif %}
      </nav>
      {% if business.description %}<p>{{ business.description }}</p>{% endif %}
      <dl>
        {% if business.address %}<dt>Address</dt><dd>{{ business.address }}{% if business.postal_code %} {{ business.postal_code }}{% endif %}</dd>{% endif %}
        {% if phone %}<dt>Phone</dt><dd><a href="tel:{{ phone.href }}">{{ phone.display }}</a></dd>{% endif %}
        {% if business.website %}<dt>Website</dt><dd><a href="{{ business.website }}" rel="nofollow">{{ business.website }}</a></dd>{% endif %}
        {% if business.email %}<dt>Email</dt><dd><a href="mailto:{{ business.email }}">{{ business.email }}</a></dd>{% endif %}
      </dl>
      {% if hours %}
      <table class="hours">
        {% for row in hours %}<tr><th>{{ row.day }}</th><td>{{ row.hours }}</td></tr>
        {% endfor %}
      </table>
      {% endif %}
      {% if categories %}
      <ul class="categories">
        {% for category in categories %}<li><a href="/{{ category.path | safe }}">{{ category.name }}</a></li>
        {% endfor %}
      </ul>
      {% endif %}
      {% if business.amenity_ids %}<h2>Amenities</h2><ul>{% for amenity in business.amenity_ids %}<li>{{ amenity }}</li>{% endfor %}</ul>{% endif %}
      {% if business.payment_ids %}<h2>Payments</h2><ul>{% for payment in business.payment_ids %}<li>{{ payment }}</li>{% endfor %}</ul>{% endif %}
      {% if business.details %}<h2>Details</h2><dl>{% for detail in business.details %}<dt>{{ detail.key }}</dt><dd>{{ detail.value }}</dd>{% endfor %}</dl>{% endif %}
      {% for image in business.images %}<img src="{{ image }}" alt="{{ business.title }}" loading="lazy">
      {% endfor %}
    </article>
{% endblock content %}
"#;
